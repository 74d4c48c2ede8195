//! # quill
//!
//! A small blog backend: JSON endpoints for posts and authors, stored in
//! SQLite through `sqlx`, served by `hyper` on `tokio`.
//!
//! The crate has three layers:
//!
//! - an HTTP layer: [`Router`] (radix-tree routing via [`matchit`], one tree
//!   per method), [`Request`], [`Response`] and [`Server`] with graceful
//!   shutdown on SIGTERM / Ctrl-C;
//! - the persistence gateway, [`store::BlogStore`], with its SQLite
//!   implementation [`store::SqliteBlogStore`];
//! - the endpoints in [`api`], which validate input, delegate to the
//!   gateway, and map its typed errors onto status codes.
//!
//! ## Running in-process
//!
//! ```rust,no_run
//! use quill::api::{self, AppState};
//! use quill::store::SqliteBlogStore;
//! use quill::{Method, Request};
//!
//! # async fn run() -> Result<(), quill::Error> {
//! let pool = sqlx::SqlitePool::connect("sqlite::memory:").await?;
//! let store = SqliteBlogStore::new(pool);
//! store.migrate().await?;
//!
//! let app = api::router(AppState::new(store));
//! let response = app.respond(Request::new(Method::Get, "/posts")).await;
//! assert_eq!(response.body(), b"[]");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
