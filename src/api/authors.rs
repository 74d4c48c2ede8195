//! `/authors`.

use crate::api::body::JsonObject;
use crate::api::{ApiError, AppState};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::NewAuthor;

/// Both fields are required strings and are stored trimmed.
fn validate(body: &JsonObject) -> Result<NewAuthor, ApiError> {
    if body.is_blank("name") || body.is_blank("email") {
        return Err(ApiError::Validation("name and email are required"));
    }
    let (Some(name), Some(email)) = (body.str("name"), body.str("email")) else {
        return Err(ApiError::Validation("name and email must be strings"));
    };
    Ok(NewAuthor {
        name: name.trim().to_owned(),
        email: email.trim().to_owned(),
    })
}

/// `POST /authors`: registers an author that posts can then reference.
pub async fn create(req: Request, state: AppState) -> Result<Response, ApiError> {
    let new_author = validate(&JsonObject::from_request(&req)?)?;

    let author = state.store().create_author(new_author).await?;
    tracing::info!(author_id = author.id, "author created");

    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/authors/{}", author.id))
        .json_value(&author))
}
