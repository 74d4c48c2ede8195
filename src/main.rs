//! quill server binary.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl -X POST http://localhost:3000/authors \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"Test User","email":"test@example.com"}'
//!   curl -X POST http://localhost:3000/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Hello","content":"First post","authorId":1}'
//!   curl http://localhost:3000/posts
//!   curl http://localhost:3000/posts/1

use quill::api::{self, AppState};
use quill::store::SqliteBlogStore;
use quill::{Config, Server};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), quill::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections.get())
        .connect(&config.database_url)
        .await?;
    let store = SqliteBlogStore::new(pool.clone());
    store.migrate().await?;
    info!(database_url = %config.database_url, "database ready");

    let app = api::router(AppState::new(store));
    let served = Server::bind(config.addr).serve(app).await;

    // Every connection has drained by now; release the pool before exiting.
    pool.close().await;
    served
}
