//! The persistence gateway.
//!
//! [`BlogStore`] is the only component allowed to issue storage queries.
//! Endpoints receive it through the application state and match the typed
//! error of each operation exhaustively; no raw database error is ever
//! rendered to a client.

mod models;
mod sqlite;

pub use models::{Author, NewAuthor, NewPost, Post, PostWithAuthor};
pub use sqlite::SqliteBlogStore;

/// Typed reads and writes over authors and posts.
#[async_trait::async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Loads one post joined with its author.
    async fn find_post(&self, id: i64) -> Result<PostWithAuthor, FindPostError>;

    /// Loads every post joined with its author, newest first.
    ///
    /// An empty store yields an empty vector.
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, sqlx::Error>;

    /// Inserts a post, stamping it with a fresh id and the current time.
    async fn create_post(&self, post: NewPost) -> Result<Post, CreatePostError>;

    /// Inserts an author.
    async fn create_author(&self, author: NewAuthor) -> Result<Author, CreateAuthorError>;

    /// Round-trips a trivial query to check the database is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum FindPostError {
    #[error("there is no post with id {id}")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePostError {
    #[error("there is no author with id {author_id}")]
    AuthorNotFound { author_id: i64 },
    #[error(transparent)]
    Other(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CreateAuthorError {
    #[error("an author with email `{email}` already exists")]
    DuplicateEmail { email: String },
    #[error(transparent)]
    Other(#[from] sqlx::Error),
}
