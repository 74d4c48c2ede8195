//! Types related to [`SqliteBlogStore`].

use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;

use super::models::{Author, NewAuthor, NewPost, Post, PostAuthorRow, PostWithAuthor};
use super::{BlogStore, CreateAuthorError, CreatePostError, FindPostError};

const SELECT_POST_WITH_AUTHOR: &str = "\
    SELECT p.id, p.title, p.content, p.published, p.created_at, p.author_id, \
           a.name AS author_name, a.email AS author_email \
    FROM posts p \
    JOIN authors a ON a.id = p.author_id";

/// A [`BlogStore`] backed by SQLite through `sqlx`.
///
/// Foreign keys must be enforced on every connection; `sqlx` turns them on
/// by default for SQLite. Use [`migrate`](Self::migrate) to create the
/// tables, or [`migration_query`](Self::migration_query) to run the DDL
/// yourself.
#[derive(Debug, Clone)]
pub struct SqliteBlogStore(SqlitePool);

impl SqliteBlogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    /// The query that creates the `authors` and `posts` tables.
    ///
    /// It is idempotent: tables and index are only created when missing.
    pub fn migration_query() -> &'static str {
        "CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    published BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES authors(id)
);

CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);"
    }

    /// Create the tables and index. Safe to call on every startup.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        use sqlx::Executor as _;

        self.0.execute(Self::migration_query()).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BlogStore for SqliteBlogStore {
    #[tracing::instrument(name = "Load post", level = tracing::Level::INFO, skip(self))]
    async fn find_post(&self, id: i64) -> Result<PostWithAuthor, FindPostError> {
        let sql = format!("{SELECT_POST_WITH_AUTHOR} WHERE p.id = ?");
        let row = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .bind(id)
            .fetch_optional(&self.0)
            .await?;
        row.map(PostWithAuthor::from)
            .ok_or(FindPostError::NotFound { id })
    }

    #[tracing::instrument(name = "List posts", level = tracing::Level::INFO, skip_all)]
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        // `id` only breaks ties between posts created in the same millisecond.
        let sql = format!("{SELECT_POST_WITH_AUTHOR} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .fetch_all(&self.0)
            .await?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    #[tracing::instrument(
        name = "Create post",
        level = tracing::Level::INFO,
        skip_all,
        fields(author_id = post.author_id),
    )]
    async fn create_post(&self, post: NewPost) -> Result<Post, CreatePostError> {
        // Millisecond precision, so the stored value reads back unchanged.
        let created_at = Utc::now().trunc_subsecs(3);
        let query = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content, published, created_at, author_id) \
            VALUES (?, ?, ?, ?, ?) \
            RETURNING id, title, content, published, created_at, author_id",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published)
        .bind(created_at)
        .bind(post.author_id);

        match query.fetch_one(&self.0).await {
            Ok(created) => Ok(created),
            Err(e) if is_foreign_key_violation(&e) => Err(CreatePostError::AuthorNotFound {
                author_id: post.author_id,
            }),
            Err(e) => Err(CreatePostError::Other(e)),
        }
    }

    #[tracing::instrument(name = "Create author", level = tracing::Level::INFO, skip_all)]
    async fn create_author(&self, author: NewAuthor) -> Result<Author, CreateAuthorError> {
        let query = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, email) VALUES (?, ?) RETURNING id, name, email",
        )
        .bind(&author.name)
        .bind(&author.email);

        match query.fetch_one(&self.0).await {
            Ok(created) => Ok(created),
            Err(e) if is_unique_violation(&e) => Err(CreateAuthorError::DuplicateEmail {
                email: author.email,
            }),
            Err(e) => Err(CreateAuthorError::Other(e)),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.0).await?;
        Ok(())
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|e| e.is_foreign_key_violation())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|e| e.is_unique_violation())
}
