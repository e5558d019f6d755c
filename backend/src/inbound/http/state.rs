//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PhonesQuery, PostsCommand, PostsQuery, UsersCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub phones_query: Arc<dyn PhonesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub phones_query: Arc<dyn PhonesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use postbook::domain::{PhoneService, PostService, UserService};
    /// use postbook::inbound::http::state::{HttpState, HttpStatePorts};
    /// use postbook::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let users = Arc::new(UserService::new(store.clone(), store.clone()));
    /// let posts = Arc::new(PostService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: users.clone(),
    ///     users_query: users,
    ///     posts: posts.clone(),
    ///     posts_query: posts,
    ///     phones_query: Arc::new(PhoneService::new(store)),
    /// });
    /// let _users = state.users_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            posts,
            posts_query,
            phones_query,
        } = ports;
        Self {
            users,
            users_query,
            posts,
            posts_query,
            phones_query,
        }
    }
}
