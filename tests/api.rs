use quill::api::{self, AppState};
use quill::store::{
    Author, BlogStore, CreateAuthorError, CreatePostError, FindPostError, NewAuthor, NewPost,
    Post, PostWithAuthor, SqliteBlogStore,
};
use quill::{Method, Request, Router, Status};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;

async fn create_test_app() -> Router<AppState> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteBlogStore::new(pool);
    store.migrate().await.unwrap();
    api::router(AppState::new(store))
}

async fn get(app: &Router<AppState>, path: &str) -> (Status, Value) {
    let response = app.respond(Request::new(Method::Get, path)).await;
    (response.status_code(), serde_json::from_slice(response.body()).unwrap())
}

async fn post(app: &Router<AppState>, path: &str, body: Value) -> (Status, Value) {
    let request = Request::new(Method::Post, path).with_body(body.to_string());
    let response = app.respond(request).await;
    (response.status_code(), serde_json::from_slice(response.body()).unwrap())
}

async fn seed_author(app: &Router<AppState>) -> i64 {
    let (status, body) = post(app, "/authors", json!({"name": "A", "email": "a@x.com"})).await;
    assert_eq!(status, Status::Created);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn empty_database_lists_no_posts() {
    let app = create_test_app().await;
    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_post_defaults_to_unpublished_and_reads_back() {
    let app = create_test_app().await;
    let author_id = seed_author(&app).await;

    let request = Request::new(Method::Post, "/posts")
        .with_body(json!({"title": "T", "content": "C", "authorId": author_id}).to_string());
    let response = app.respond(request).await;
    assert_eq!(response.status_code(), Status::Created);

    let created: Post = serde_json::from_slice(response.body()).unwrap();
    assert!(!created.published);
    assert_eq!(created.author_id, author_id);
    assert_eq!(response.header("location"), Some(format!("/posts/{}", created.id).as_str()));

    // The creation response is the bare record.
    let raw: Value = serde_json::from_slice(response.body()).unwrap();
    assert!(raw.get("author").is_none());

    let (status, body) = get(&app, &format!("/posts/{}", created.id)).await;
    assert_eq!(status, Status::Ok);
    let fetched: PostWithAuthor = serde_json::from_value(body).unwrap();
    assert_eq!(fetched.post, created);
    assert_eq!(fetched.author.email, "a@x.com");
}

#[tokio::test]
async fn published_flag_is_kept_when_given() {
    let app = create_test_app().await;
    let author_id = seed_author(&app).await;
    let (status, body) = post(
        &app,
        "/posts",
        json!({"title": "T", "content": "C", "authorId": author_id, "published": true}),
    )
    .await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["published"], true);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = create_test_app().await;
    for path in ["/posts/abc", "/posts/1.5", "/posts/99999999999999999999"] {
        let (status, body) = get(&app, path).await;
        assert_eq!(status, Status::BadRequest, "{path}");
        assert_eq!(body, json!({"error": "invalid id"}));
    }
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let app = create_test_app().await;
    let (status, body) = get(&app, "/posts/999").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, json!({"error": "post not found"}));
}

#[tokio::test]
async fn missing_title_or_content_is_rejected_before_any_write() {
    let app = create_test_app().await;
    let author_id = seed_author(&app).await;

    for body in [
        json!({"content": "C", "authorId": author_id}),
        json!({"title": "T", "authorId": author_id}),
        json!({"title": "", "content": "C", "authorId": author_id}),
        json!({"title": "T"}),
    ] {
        let (status, response) = post(&app, "/posts", body).await;
        assert_eq!(status, Status::BadRequest);
        assert_eq!(response, json!({"error": "title and content are required"}));
    }

    let (_, posts) = get(&app, "/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn blank_title_is_reported_before_a_mistyped_author_id() {
    let app = create_test_app().await;
    let (status, body) =
        post(&app, "/posts", json!({"title": "", "content": "C", "authorId": "x"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({"error": "title and content are required"}));
}

#[tokio::test]
async fn mistyped_fields_are_rejected() {
    let app = create_test_app().await;
    let author_id = seed_author(&app).await;

    let (status, body) =
        post(&app, "/posts", json!({"title": "T", "content": "C", "authorId": "one"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({"error": "authorId must be an integer"}));

    let (status, body) = post(
        &app,
        "/posts",
        json!({"title": "T", "content": "C", "authorId": author_id, "published": "yes"}),
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({"error": "published must be a boolean"}));

    let (_, posts) = get(&app, "/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn missing_author_id_is_rejected() {
    let app = create_test_app().await;
    let (status, body) = post(&app, "/posts", json!({"title": "T", "content": "C"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({"error": "authorId is required"}));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = create_test_app().await;
    for raw in ["", "not json", "[1,2]", "\"T\""] {
        let request = Request::new(Method::Post, "/posts").with_body(raw);
        let response = app.respond(request).await;
        assert_eq!(response.status_code(), Status::BadRequest, "{raw}");
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, json!({"error": "request body must be a JSON object"}));
    }
}

#[tokio::test]
async fn unknown_author_is_not_found_and_creates_nothing() {
    let app = create_test_app().await;
    let (status, body) =
        post(&app, "/posts", json!({"title": "T", "content": "C", "authorId": 7})).await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, json!({"error": "author not found"}));

    let (_, posts) = get(&app, "/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn list_is_ordered_newest_first_with_authors() {
    let app = create_test_app().await;
    let author_id = seed_author(&app).await;
    for title in ["first", "second", "third"] {
        let (status, _) =
            post(&app, "/posts", json!({"title": title, "content": "C", "authorId": author_id}))
                .await;
        assert_eq!(status, Status::Created);
    }

    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, Status::Ok);
    let posts: Vec<PostWithAuthor> = serde_json::from_value(body).unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.post.title.as_str()).collect();
    assert_eq!(titles, ["third", "second", "first"]);
    for pair in posts.windows(2) {
        assert!(pair[0].post.created_at >= pair[1].post.created_at);
    }
    assert!(posts.iter().all(|p| p.author.id == author_id));
}

#[tokio::test]
async fn author_validation_and_uniqueness() {
    let app = create_test_app().await;

    let (status, body) = post(&app, "/authors", json!({"name": "A"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({"error": "name and email are required"}));

    seed_author(&app).await;
    let (status, body) = post(&app, "/authors", json!({"name": "B", "email": " a@x.com "})).await;
    assert_eq!(status, Status::Conflict);
    assert_eq!(body, json!({"error": "email already in use"}));
}

#[tokio::test]
async fn author_name_and_email_are_stored_trimmed() {
    let app = create_test_app().await;
    let (status, body) =
        post(&app, "/authors", json!({"name": "  Ada Lovelace ", "email": " ada@x.com "})).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@x.com");
}

#[tokio::test]
async fn health_probes() {
    let app = create_test_app().await;

    let live = app.respond(Request::new(Method::Get, "/healthz")).await;
    assert_eq!(live.status_code(), Status::Ok);
    assert_eq!(live.body(), b"ok");

    let ready = app.respond(Request::new(Method::Get, "/readyz")).await;
    assert_eq!(ready.status_code(), Status::Ok);
    assert_eq!(ready.body(), b"ready");
}

#[tokio::test]
async fn unrouted_requests() {
    let app = create_test_app().await;

    let (status, _) = get(&app, "/comments").await;
    assert_eq!(status, Status::NotFound);

    let response = app.respond(Request::new(Method::Delete, "/posts/1")).await;
    assert_eq!(response.status_code(), Status::MethodNotAllowed);
    assert_eq!(response.header("allow"), Some("GET, HEAD"));
}

#[tokio::test]
async fn head_requests_mirror_get_without_a_body() {
    let app = create_test_app().await;

    let response = app.respond(Request::new(Method::Head, "/posts")).await;
    assert_eq!(response.status_code(), Status::Ok);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert!(response.body().is_empty());

    let response = app.respond(Request::new(Method::Head, "/posts/999")).await;
    assert_eq!(response.status_code(), Status::NotFound);
    assert!(response.body().is_empty());

    let response = app.respond(Request::new(Method::Head, "/authors")).await;
    assert_eq!(response.status_code(), Status::MethodNotAllowed);
    assert_eq!(response.header("allow"), Some("POST"));
}

// ── Gateway failures ──────────────────────────────────────────────────────────

/// A store whose database is always gone.
struct BrokenStore;

#[async_trait::async_trait]
impl BlogStore for BrokenStore {
    async fn find_post(&self, _id: i64) -> Result<PostWithAuthor, FindPostError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        Err(sqlx::Error::Protocol("database disk image is malformed".into()))
    }

    async fn create_post(&self, _post: NewPost) -> Result<Post, CreatePostError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn create_author(&self, _author: NewAuthor) -> Result<Author, CreateAuthorError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }
}

#[tokio::test]
async fn gateway_failures_are_generic_server_errors() {
    let app = api::router(AppState::new(BrokenStore));
    let generic = json!({"error": "internal server error"});

    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, generic);

    let (status, body) = get(&app, "/posts/1").await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, generic);

    let (status, body) =
        post(&app, "/posts", json!({"title": "T", "content": "C", "authorId": 1})).await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, generic);

    let (status, body) = post(&app, "/authors", json!({"name": "A", "email": "a@x.com"})).await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, generic);

    let ready = app.respond(Request::new(Method::Get, "/readyz")).await;
    assert_eq!(ready.status_code(), Status::ServiceUnavailable);
}

#[tokio::test]
async fn validation_runs_before_a_broken_gateway() {
    let app = api::router(AppState::new(BrokenStore));
    let (status, _) = post(&app, "/posts", json!({"content": "C"})).await;
    assert_eq!(status, Status::BadRequest);
    let (status, _) = get(&app, "/posts/abc").await;
    assert_eq!(status, Status::BadRequest);
}
