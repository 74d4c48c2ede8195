//! Infrastructure error type.

/// The error type returned by quill's startup and serving operations.
///
/// Request-level failures (400, 404, 500, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// failures that stop the process: reading configuration, opening or
/// migrating the database, and binding the listening socket.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] figment::Error),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
