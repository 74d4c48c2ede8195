//! Records read from and written to the database.
//!
//! Field names serialize in camelCase: `createdAt`, `authorId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A post as stored, without its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
}

/// A post joined with the author it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
}

/// One row of the posts ⋈ authors query.
#[derive(sqlx::FromRow)]
pub(crate) struct PostAuthorRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub author_name: String,
    pub author_email: String,
}

impl From<PostAuthorRow> for PostWithAuthor {
    fn from(row: PostAuthorRow) -> Self {
        Self {
            author: Author {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
            },
            post: Post {
                id: row.id,
                title: row.title,
                content: row.content,
                published: row.published,
                created_at: row.created_at,
                author_id: row.author_id,
            },
        }
    }
}
