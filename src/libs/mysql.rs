use async_trait::async_trait;
use sqlx::Connection;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::reader::{SchemaReader, connection_error};
use crate::schema::{ColumnInfo, TableList};

// INFORMATION_SCHEMA text columns come back as binary strings on some server
// versions, hence the casts.
const DESCRIBE_TABLE: &str = "
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS name,
        CAST(DATA_TYPE AS CHAR) AS sql_type,
        CAST(IS_NULLABLE AS CHAR) AS is_nullable,
        CAST(COLUMN_KEY AS CHAR) AS column_key,
        CAST(COLUMN_COMMENT AS CHAR) AS comment
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION";

const LIST_TABLES: &str = "
    SELECT CAST(TABLE_NAME AS CHAR)
    FROM INFORMATION_SCHEMA.TABLES
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME";

#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    name: String,
    sql_type: String,
    is_nullable: String,
    column_key: String,
    comment: Option<String>,
}

impl From<ColumnRow> for ColumnInfo {
    fn from(row: ColumnRow) -> Self {
        ColumnInfo {
            name: row.name,
            sql_type: row.sql_type,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            is_primary_key: row.column_key == "PRI",
            comment: row.comment.unwrap_or_default(),
        }
    }
}

pub struct MySqlReader {
    pool: MySqlPool,
}

impl MySqlReader {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(connection_error(Dialect::MySql))?;

        let mut conn = pool
            .acquire()
            .await
            .map_err(connection_error(Dialect::MySql))?;
        conn.ping().await.map_err(connection_error(Dialect::MySql))?;

        Ok(Self { pool })
    }

    async fn current_database(&self) -> Result<String> {
        let (name,): (Option<String>,) = sqlx::query_as("SELECT CAST(DATABASE() AS CHAR)")
            .fetch_one(&self.pool)
            .await?;
        selected_database(name)
    }
}

/// `DATABASE()` is NULL when the URL names no schema.
fn selected_database(name: Option<String>) -> Result<String> {
    name.ok_or(Error::NoDatabaseSelected(Dialect::MySql))
}

#[async_trait]
impl SchemaReader for MySqlReader {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn list_tables(&self) -> Result<TableList> {
        let database = self.current_database().await?;
        log::debug!("Listing tables of MySQL schema {}", database);

        let rows: Vec<(String,)> = sqlx::query_as(LIST_TABLES)
            .bind(&database)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let database = self.current_database().await?;
        let rows: Vec<ColumnRow> = sqlx::query_as(DESCRIBE_TABLE)
            .bind(&database)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ColumnInfo::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_nullable: &str, column_key: &str) -> ColumnRow {
        ColumnRow {
            name: "id".into(),
            sql_type: "bigint".into(),
            is_nullable: is_nullable.into(),
            column_key: column_key.into(),
            comment: None,
        }
    }

    #[test]
    fn nullability_comes_from_is_nullable_text() {
        assert!(ColumnInfo::from(row("YES", "")).nullable);
        assert!(!ColumnInfo::from(row("NO", "")).nullable);
    }

    #[test]
    fn only_pri_marks_primary_key() {
        assert!(ColumnInfo::from(row("NO", "PRI")).is_primary_key);
        assert!(!ColumnInfo::from(row("NO", "UNI")).is_primary_key);
        assert!(!ColumnInfo::from(row("NO", "MUL")).is_primary_key);
    }

    #[test]
    fn missing_comment_is_empty() {
        assert_eq!(ColumnInfo::from(row("NO", "")).comment, "");
    }

    #[test]
    fn null_database_is_an_error_not_an_empty_schema() {
        assert!(matches!(
            selected_database(None),
            Err(Error::NoDatabaseSelected(Dialect::MySql))
        ));
        assert_eq!(selected_database(Some("shop".into())).unwrap(), "shop");
    }
}
