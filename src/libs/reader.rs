use async_trait::async_trait;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::mysql::MySqlReader;
use crate::postgres::PostgresReader;
use crate::schema::{ColumnInfo, TableList};
use crate::sqlite::SqliteReader;

/// Reads table metadata from one open database connection.
#[async_trait]
pub trait SchemaReader: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// All user tables of the active database or schema.
    async fn list_tables(&self) -> Result<TableList>;

    /// Columns of `table` in ordinal order.
    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    async fn close(&self);
}

/// Open a reader for `dialect` on `url`.
///
/// The dialect is checked before anything touches the network, so an unknown
/// name fails with [`Error::UnsupportedDialect`] whatever the URL.
///
/// # Example
/// ```ignore
/// let reader = slintgen::connect("sqlite3", "sqlite://app.db").await?;
/// let tables = reader.list_tables().await?;
/// ```
pub async fn connect(dialect: &str, url: &str) -> Result<Box<dyn SchemaReader>> {
    let dialect: Dialect = dialect.parse()?;
    log::info!("Connecting to {} database", dialect);

    let reader: Box<dyn SchemaReader> = match dialect {
        Dialect::MySql => Box::new(MySqlReader::connect(url).await?),
        Dialect::Postgres => Box::new(PostgresReader::connect(url).await?),
        Dialect::Sqlite => Box::new(SqliteReader::connect(url).await?),
    };
    Ok(reader)
}

/// Wraps a connect/ping failure with the dialect it happened on.
pub(crate) fn connection_error(dialect: Dialect) -> impl FnOnce(sqlx::Error) -> Error {
    move |source| Error::Connection { dialect, source }
}
