//! The blog's HTTP endpoints.
//!
//! | Route | Method | Success | Failure |
//! |---|---|---|---|
//! | `/posts` | GET | 200 `[PostWithAuthor]` | 500 |
//! | `/posts` | POST | 201 `Post` | 400, 404, 500 |
//! | `/posts/{id}` | GET | 200 `PostWithAuthor` | 400, 404, 500 |
//! | `/authors` | POST | 201 `Author` | 400, 409, 500 |
//! | `/healthz` | GET | 200 | |
//! | `/readyz` | GET | 200 | 503 |
//!
//! Every failure body is `{"error": "<message>"}`.

use std::sync::Arc;

use crate::method::Method;
use crate::router::Router;
use crate::store::BlogStore;

mod authors;
mod body;
mod error;
mod health;
mod posts;

pub use error::ApiError;

/// State handed to every endpoint: the persistence gateway.
///
/// Cloning is one reference-count increment.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn BlogStore>,
}

impl AppState {
    pub fn new(store: impl BlogStore) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn store(&self) -> &dyn BlogStore {
        self.store.as_ref()
    }
}

/// Builds the application router around `state`.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new(state)
        .on(Method::Get,  "/posts",      posts::list)
        .on(Method::Post, "/posts",      posts::create)
        .on(Method::Get,  "/posts/{id}", posts::show)
        .on(Method::Post, "/authors",    authors::create)
        .on(Method::Get,  "/healthz",    health::liveness)
        .on(Method::Get,  "/readyz",     health::readiness)
}
