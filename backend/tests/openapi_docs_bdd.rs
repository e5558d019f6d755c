//! Behaviour tests for the generated OpenAPI document.
//!
//! These tests verify that every REST endpoint is registered and that the
//! document references the schema wrappers from `inbound::http::schemas`.
use std::sync::Mutex;

use postbook::doc::ApiDoc;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use utoipa::OpenApi;
use utoipa::openapi::path::HttpMethod;
use utoipa::openapi::schema::Schema;
use utoipa::openapi::RefOr;

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
    json: Option<String>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .field("json", &self.json)
            .finish()
    }
}

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

// Note: utoipa replaces :: with . in schema names
const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

fn assert_methods(world: &Mutex<OpenApiWorld>, path: &str, methods: &[HttpMethod]) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let item = doc
        .paths
        .paths
        .get(path)
        .unwrap_or_else(|| panic!("{path} should be documented"));

    for method in methods {
        let operation = match method {
            HttpMethod::Get => item.get.as_ref(),
            HttpMethod::Post => item.post.as_ref(),
            HttpMethod::Put => item.put.as_ref(),
            HttpMethod::Delete => item.delete.as_ref(),
            _ => None,
        };
        assert!(operation.is_some(), "{path} should document {method:?}");
    }
}

#[given("the OpenAPI document is generated")]
fn generate_openapi_document(world: &Mutex<OpenApiWorld>) {
    let mut world = world.lock().expect("world lock");
    let doc = ApiDoc::openapi();
    world.json = Some(doc.to_json().expect("valid JSON"));
    world.document = Some(doc);
}

#[when("the document is inspected")]
fn inspect_document(world: &Mutex<OpenApiWorld>) {
    // Verify document was generated in the given step
    let world = world.lock().expect("world lock");
    assert!(world.document.is_some(), "document should be generated");
}

#[then("the users collection supports GET and POST")]
fn users_collection(world: &Mutex<OpenApiWorld>) {
    assert_methods(world, "/api/users", &[HttpMethod::Get, HttpMethod::Post]);
}

#[then("the single user path supports GET, PUT and DELETE")]
fn single_user(world: &Mutex<OpenApiWorld>) {
    assert_methods(
        world,
        "/api/users/{id}",
        &[HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete],
    );
}

#[then("the posts collection supports GET and POST")]
fn posts_collection(world: &Mutex<OpenApiWorld>) {
    assert_methods(world, "/api/posts", &[HttpMethod::Get, HttpMethod::Post]);
    assert_methods(
        world,
        "/api/posts/{id}",
        &[HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete],
    );
}

#[then("the phone path supports GET")]
fn phone_path(world: &Mutex<OpenApiWorld>) {
    assert_methods(world, "/api/phones/{id}", &[HttpMethod::Get]);
}

#[then("the health probes are documented")]
fn health_probes(world: &Mutex<OpenApiWorld>) {
    assert_methods(world, "/health/ready", &[HttpMethod::Get]);
    assert_methods(world, "/health/live", &[HttpMethod::Get]);
}

#[then("the components section contains the Error schema wrapper")]
fn contains_error_schema(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");

    assert!(
        components.schemas.contains_key(ERROR_SCHEMA_NAME),
        "Error schema wrapper should be registered"
    );
}

#[then("the create user endpoint references ErrorSchema for error responses")]
fn create_user_references_error_schema(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let json = world.json.as_ref().expect("JSON generated");

    assert!(
        json.contains(&format!("#/components/schemas/{ERROR_SCHEMA_NAME}")),
        "create user should reference {ERROR_SCHEMA_NAME}"
    );
}

#[then("the user response schema nests the phone")]
fn user_response_nests_phone(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");
    let user = components
        .schemas
        .get("UserResponse")
        .expect("UserResponse schema");

    match user {
        RefOr::T(Schema::Object(obj)) => {
            assert!(obj.properties.contains_key("phone"));
            assert!(!obj.properties.contains_key("password"));
        }
        _ => panic!("UserResponse should be an object schema"),
    }
}

#[scenario(
    path = "tests/features/openapi_docs.feature",
    name = "Document lists the resource endpoints"
)]
fn document_lists_the_resource_endpoints(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi_docs.feature",
    name = "Document describes the error payload"
)]
fn document_describes_the_error_payload(world: Mutex<OpenApiWorld>) {
    drop(world);
}
