//! `/posts` and `/posts/{id}`.

use crate::api::body::JsonObject;
use crate::api::{ApiError, AppState};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;
use crate::store::NewPost;

/// Checks a `POST /posts` body in a fixed order: title and content present,
/// then author present, then the type of every field.
pub(crate) fn validate(body: &JsonObject) -> Result<NewPost, ApiError> {
    if body.is_blank("title") || body.is_blank("content") {
        return Err(ApiError::Validation("title and content are required"));
    }
    let Some(author_id) = body.get("authorId") else {
        return Err(ApiError::Validation("authorId is required"));
    };

    let (Some(title), Some(content)) = (body.str("title"), body.str("content")) else {
        return Err(ApiError::Validation("title and content must be strings"));
    };
    let author_id = author_id
        .as_i64()
        .ok_or(ApiError::Validation("authorId must be an integer"))?;
    let published = match body.get("published") {
        None => false,
        Some(flag) => flag
            .as_bool()
            .ok_or(ApiError::Validation("published must be a boolean"))?,
    };

    Ok(NewPost {
        title: title.to_owned(),
        content: content.to_owned(),
        published,
        author_id,
    })
}

/// `GET /posts`: every post with its author, newest first.
pub async fn list(_req: Request, state: AppState) -> Result<impl IntoResponse, ApiError> {
    let posts = state.store().list_posts().await.map_err(ApiError::internal)?;
    Ok(Json(posts))
}

/// `POST /posts`: creates a post for an existing author.
///
/// Responds `201` with the stored post (author not joined) and a
/// `location` header pointing at it.
pub async fn create(req: Request, state: AppState) -> Result<Response, ApiError> {
    let new_post = validate(&JsonObject::from_request(&req)?)?;

    let post = state.store().create_post(new_post).await?;
    tracing::info!(post_id = post.id, author_id = post.author_id, "post created");

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/posts/{}", post.id))
        .json_value(&post))
}

/// `GET /posts/{id}`: one post with its author.
pub async fn show(req: Request, state: AppState) -> Result<impl IntoResponse, ApiError> {
    let id = req
        .param("id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or(ApiError::Validation("invalid id"))?;
    let post = state.store().find_post(id).await?;
    Ok(Json(post))
}
