//! Process configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `QUILL_ADDR` | `0.0.0.0:3000` |
//! | `DATABASE_URL` | `sqlite://quill.db?mode=rwc` |
//! | `QUILL_DB_MAX_CONNECTIONS` | `5` |
//!
//! Log verbosity is controlled separately through `RUST_LOG`.

use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

use figment::Figment;
use figment::providers::Env;
use serde::{Deserialize, Serialize};

/// Runtime configuration for the quill binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_addr")]
    pub addr: SocketAddr,

    /// sqlx connection string for the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Upper bound on pooled database connections.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: NonZeroU32,
}

fn default_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000))
}

fn default_database_url() -> String {
    "sqlite://quill.db?mode=rwc".to_owned()
}

fn default_db_max_connections() -> NonZeroU32 {
    NonZeroU32::MIN.saturating_add(4)
}

impl Config {
    /// The configuration sources, lowest priority first: `QUILL_`-prefixed
    /// variables, then the conventional `DATABASE_URL`.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Env::prefixed("QUILL_"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
