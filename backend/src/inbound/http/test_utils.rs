//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{PhoneService, PostService, UserService};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Wire the real services over a fresh in-memory store.
///
/// The store is returned too so tests can seed or inspect it directly.
pub fn memory_state() -> (web::Data<HttpState>, InMemoryStore) {
    let store = InMemoryStore::new();
    let shared = Arc::new(store.clone());
    let users = Arc::new(UserService::new(shared.clone(), shared.clone()));
    let posts = Arc::new(PostService::new(shared.clone(), shared.clone()));
    let state = HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        posts: posts.clone(),
        posts_query: posts,
        phones_query: Arc::new(PhoneService::new(shared)),
    });
    (web::Data::new(state), store)
}

/// Build an app exposing the `/api` scope over `state`.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(api_scope())
}
