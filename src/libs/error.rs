use std::path::PathBuf;

use crate::dialect::Dialect;

/// Everything that can go wrong between opening a connection and writing the
/// generated file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Opening or pinging the database failed.
    #[error("failed to connect to {dialect} database: {source}")]
    Connection {
        dialect: Dialect,
        #[source]
        source: sqlx::Error,
    },

    #[error("unsupported database type: {0}")]
    UnsupportedDialect(String),

    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// MySQL connection URL without a database name.
    #[error("no database selected on the {0} connection")]
    NoDatabaseSelected(Dialect),

    /// An introspection query failed; carries the driver error unchanged.
    #[error("schema query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render struct for table {table}: {source}")]
    Render {
        table: String,
        #[source]
        source: std::fmt::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
