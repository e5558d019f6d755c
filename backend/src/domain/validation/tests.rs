//! Regression coverage for the request validator.

use std::sync::Mutex;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;

/// Lookup stub holding `(column, value, row id)` triples.
#[derive(Default)]
struct StubLookup {
    rows: Vec<(RecordColumn, LookupValue, i64)>,
    calls: Mutex<Vec<(RecordColumn, Option<i64>)>>,
    failure: Option<RecordLookupError>,
}

impl StubLookup {
    fn with_row(mut self, column: RecordColumn, value: LookupValue, id: i64) -> Self {
        self.rows.push((column, value, id));
        self
    }

    fn calls(&self) -> Vec<(RecordColumn, Option<i64>)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RecordLookup for StubLookup {
    async fn value_exists(
        &self,
        column: RecordColumn,
        value: &LookupValue,
        ignore_id: Option<i64>,
    ) -> Result<bool, RecordLookupError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((column, ignore_id));
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(self.rows.iter().any(|(stored_column, stored_value, id)| {
            *stored_column == column && stored_value == value && Some(*id) != ignore_id
        }))
    }
}

#[fixture]
fn lookup() -> StubLookup {
    StubLookup::default()
}

fn input(value: serde_json::Value) -> FieldMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test payload must be an object, got {other}"),
    }
}

fn rejected(failure: ValidationFailure) -> ValidationErrors {
    match failure {
        ValidationFailure::Rejected(errors) => errors,
        ValidationFailure::Lookup(error) => panic!("unexpected lookup failure: {error}"),
    }
}

fn reported(errors: &ValidationErrors) -> Vec<(&str, &str)> {
    errors
        .violations()
        .iter()
        .map(|violation| (violation.field.as_str(), violation.rule))
        .collect()
}

#[rstest]
#[tokio::test]
async fn missing_required_field_reports_only_required(lookup: StubLookup) {
    let rules = RuleSet::new().field("name", [Rule::Required, Rule::String, Rule::Min(3)]);

    let errors = rejected(
        validate(&rules, &FieldMap::new(), &lookup, None)
            .await
            .expect_err("missing name"),
    );

    assert_eq!(reported(&errors), [("name", "required")]);
    assert_eq!(
        errors.messages().collect::<Vec<_>>(),
        ["The name field is required."]
    );
}

#[rstest]
#[case(json!({ "name": null }))]
#[case(json!({ "name": "   " }))]
#[tokio::test]
async fn null_and_blank_count_as_missing(lookup: StubLookup, #[case] payload: serde_json::Value) {
    let rules = RuleSet::new().field("name", [Rule::Required, Rule::String]);

    let errors = rejected(
        validate(&rules, &input(payload), &lookup, None)
            .await
            .expect_err("blank name"),
    );

    assert_eq!(reported(&errors), [("name", "required")]);
}

#[rstest]
#[tokio::test]
async fn optional_absent_field_is_skipped(lookup: StubLookup) {
    let rules = RuleSet::new().field("number", [Rule::String, Rule::Max(20)]);

    let accepted = validate(&rules, &input(json!({ "number": null })), &lookup, None)
        .await
        .expect("absent optional field passes");

    assert!(!accepted.contains("number"));
}

#[rstest]
#[tokio::test]
async fn type_failure_stops_remaining_rules(lookup: StubLookup) {
    let rules = RuleSet::new().field(
        "email",
        [
            Rule::String,
            Rule::Email,
            Rule::Unique(RecordColumn::UserEmail),
        ],
    );

    let errors = rejected(
        validate(&rules, &input(json!({ "email": 12 })), &lookup, None)
            .await
            .expect_err("numeric email"),
    );

    assert_eq!(reported(&errors), [("email", "string")]);
    assert!(lookup.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn violations_follow_field_then_rule_order(lookup: StubLookup) {
    let rules = RuleSet::new()
        .field("title", [Rule::Required, Rule::String, Rule::Min(5), Rule::Max(6)])
        .field("description", [Rule::Required, Rule::String, Rule::Min(10)])
        .field("email", [Rule::String, Rule::Email, Rule::Max(5)]);

    let errors = rejected(
        validate(
            &rules,
            &input(json!({ "title": "ab", "email": "not-an-email" })),
            &lookup,
            None,
        )
        .await
        .expect_err("several violations"),
    );

    assert_eq!(
        reported(&errors),
        [
            ("title", "min"),
            ("description", "required"),
            ("email", "email"),
            ("email", "max"),
        ]
    );
}

#[rstest]
#[case("abc", true)]
#[case("ab", false)]
#[case("ábç", true)]
#[tokio::test]
async fn min_counts_characters(lookup: StubLookup, #[case] name: &str, #[case] ok: bool) {
    let rules = RuleSet::new().field("name", [Rule::String, Rule::Min(3)]);

    let outcome = validate(&rules, &input(json!({ "name": name })), &lookup, None).await;

    assert_eq!(outcome.is_ok(), ok);
}

#[rstest]
#[tokio::test]
async fn accepted_map_is_trimmed_and_limited_to_declared_fields(lookup: StubLookup) {
    let rules = RuleSet::new()
        .field("name", [Rule::Required, Rule::String])
        .field("user_id", [Rule::Integer]);

    let accepted = validate(
        &rules,
        &input(json!({ "name": "  Lam  ", "user_id": "12", "admin": true })),
        &lookup,
        None,
    )
    .await
    .expect("valid input");

    assert_eq!(accepted.text("name").as_deref(), Some("Lam"));
    assert_eq!(accepted.integer("user_id"), Some(12));
    assert!(!accepted.contains("admin"));
}

#[rstest]
#[case(json!(1.5))]
#[case(json!("twelve"))]
#[case(json!(true))]
#[tokio::test]
async fn integer_rejects_non_integers(lookup: StubLookup, #[case] value: serde_json::Value) {
    let rules = RuleSet::new().field("user_id", [Rule::Integer, Rule::Exists(RecordColumn::UserId)]);

    let errors = rejected(
        validate(&rules, &input(json!({ "user_id": value })), &lookup, None)
            .await
            .expect_err("not an integer"),
    );

    assert_eq!(reported(&errors), [("user_id", "integer")]);
}

#[rstest]
#[tokio::test]
async fn unique_ignores_the_row_being_updated() {
    let lookup = StubLookup::default().with_row(
        RecordColumn::UserEmail,
        LookupValue::Text("lam@x.com".to_owned()),
        5,
    );
    let rules = RuleSet::new().field("email", [Rule::String, Rule::Unique(RecordColumn::UserEmail)]);
    let payload = input(json!({ "email": "lam@x.com" }));

    let own_row = validate(&rules, &payload, &lookup, Some(5)).await;
    let other_row = validate(&rules, &payload, &lookup, Some(6)).await;

    assert!(own_row.is_ok());
    let errors = rejected(other_row.expect_err("taken by user 5"));
    assert_eq!(
        errors.messages().collect::<Vec<_>>(),
        ["The email has already been taken."]
    );
    assert_eq!(
        lookup.calls(),
        [
            (RecordColumn::UserEmail, Some(5)),
            (RecordColumn::UserEmail, Some(6)),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn exists_never_ignores_rows() {
    let lookup =
        StubLookup::default().with_row(RecordColumn::UserId, LookupValue::Integer(3), 3);
    let rules = RuleSet::new().field("user_id", [Rule::Integer, Rule::Exists(RecordColumn::UserId)]);

    validate(&rules, &input(json!({ "user_id": 3 })), &lookup, Some(3))
        .await
        .expect("owner exists");

    assert_eq!(lookup.calls(), [(RecordColumn::UserId, None)]);
}

#[rstest]
#[case(json!({ "password": "secret1", "password_confirmation": "secret1" }), true)]
#[case(json!({ "password": "secret1", "password_confirmation": "secret2" }), false)]
#[case(json!({ "password": "secret1" }), false)]
#[tokio::test]
async fn confirmed_requires_matching_confirmation(
    lookup: StubLookup,
    #[case] payload: serde_json::Value,
    #[case] ok: bool,
) {
    let rules = RuleSet::new().field("password", [Rule::String, Rule::Confirmed]);

    let outcome = validate(&rules, &input(payload), &lookup, None).await;

    assert_eq!(outcome.is_ok(), ok);
}

#[rstest]
#[tokio::test]
async fn lookup_failure_aborts_validation() {
    let lookup = StubLookup {
        failure: Some(RecordLookupError::query("relation missing")),
        ..StubLookup::default()
    };
    let rules = RuleSet::new().field("title", [Rule::String, Rule::Unique(RecordColumn::PostTitle)]);

    let failure = validate(&rules, &input(json!({ "title": "Hello" })), &lookup, None)
        .await
        .expect_err("lookup fails");

    assert!(matches!(failure, ValidationFailure::Lookup(_)));
    assert_eq!(Error::from(failure).code(), ErrorCode::InternalError);
}

#[rstest]
fn optional_drops_required_only() {
    let rules = RuleSet::new().field("name", [Rule::Required, Rule::String, Rule::Min(3)]);

    assert_eq!(
        rules.optional(),
        RuleSet::new().field("name", [Rule::String, Rule::Min(3)])
    );
}

#[rstest]
#[tokio::test]
async fn rejection_converts_to_error_envelope(lookup: StubLookup) {
    let rules = RuleSet::new().field("user_id", [Rule::Integer]);

    let failure = validate(&rules, &input(json!({ "user_id": "x" })), &lookup, None)
        .await
        .expect_err("not an integer");
    let error = Error::from(failure);

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.details(),
        Some(&json!({
            "errors": [{
                "field": "user_id",
                "rule": "integer",
                "message": "The user id field must be an integer.",
            }]
        }))
    );
}

#[rstest]
#[tokio::test]
async fn raw_fields_keep_surrounding_whitespace(lookup: StubLookup) {
    let rules = RuleSet::new()
        .field_raw("password", [Rule::Required, Rule::String, Rule::Min(6)])
        .optional();

    let accepted = validate(
        &rules,
        &input(json!({ "password": "  pw  " })),
        &lookup,
        None,
    )
    .await
    .expect("whitespace counts towards the minimum");

    assert_eq!(accepted.text("password").as_deref(), Some("  pw  "));
}

#[rstest]
#[tokio::test]
async fn raw_fields_still_treat_blank_as_missing(lookup: StubLookup) {
    let rules = RuleSet::new().field_raw("password", [Rule::Required, Rule::String]);

    let errors = rejected(
        validate(&rules, &input(json!({ "password": "   " })), &lookup, None)
            .await
            .expect_err("blank password is missing"),
    );

    assert_eq!(reported(&errors), [("password", "required")]);
}

#[rstest]
#[case(json!({ "password": " secret1 ", "password_confirmation": " secret1 " }), true)]
#[case(json!({ "password": " secret1 ", "password_confirmation": "secret1" }), false)]
#[tokio::test]
async fn raw_confirmation_compares_exact_values(
    lookup: StubLookup,
    #[case] payload: serde_json::Value,
    #[case] ok: bool,
) {
    let rules = RuleSet::new().field_raw("password", [Rule::String, Rule::Confirmed]);

    let outcome = validate(&rules, &input(payload), &lookup, None).await;

    assert_eq!(outcome.is_ok(), ok);
}

#[rstest]
#[tokio::test]
async fn email_values_are_lowercased_before_lookup() {
    let lookup = StubLookup::default().with_row(
        RecordColumn::UserEmail,
        LookupValue::Text("a@b.co".to_owned()),
        1,
    );
    let rules = RuleSet::new().field(
        "email",
        [Rule::String, Rule::Email, Rule::Unique(RecordColumn::UserEmail)],
    );

    let errors = rejected(
        validate(&rules, &input(json!({ "email": " A@B.CO " })), &lookup, None)
            .await
            .expect_err("email taken regardless of case"),
    );

    assert_eq!(reported(&errors), [("email", "unique")]);
}
