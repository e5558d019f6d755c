//! Builders for HTTP state ports backed by Diesel or the in-memory store.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use postbook::domain::ports::{PhoneRepository, PostRepository, RecordLookup, UserRepository};
use postbook::domain::{PhoneService, PostService, UserService};
use postbook::inbound::http::state::{HttpState, HttpStatePorts};
use postbook::outbound::memory::InMemoryStore;
use postbook::outbound::persistence::{
    DieselPhoneRepository, DieselPostRepository, DieselRecordLookup, DieselUserRepository,
};

use super::ServerConfig;

/// Wire the domain services over one set of driven adapters.
fn build_ports<U, P, Ph, L>(
    users_repo: Arc<U>,
    posts_repo: Arc<P>,
    phones_repo: Arc<Ph>,
    lookup: Arc<L>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    Ph: PhoneRepository + 'static,
    L: RecordLookup + 'static,
{
    let users = Arc::new(UserService::new(users_repo, lookup.clone()));
    let posts = Arc::new(PostService::new(posts_repo, lookup));
    HttpStatePorts {
        users: users.clone(),
        users_query: users,
        posts: posts.clone(),
        posts_query: posts,
        phones_query: Arc::new(PhoneService::new(phones_repo)),
    }
}

/// Build the shared HTTP state, preferring PostgreSQL when a pool exists.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselPhoneRepository::new(pool.clone())),
            Arc::new(DieselRecordLookup::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; records are kept in memory");
            let store = Arc::new(InMemoryStore::new());
            build_ports(store.clone(), store.clone(), store.clone(), store)
        }
    };
    web::Data::new(HttpState::new(ports))
}
