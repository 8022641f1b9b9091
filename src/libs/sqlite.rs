use async_trait::async_trait;
use sqlx::Connection;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::dialect::Dialect;
use crate::error::Result;
use crate::reader::{SchemaReader, connection_error};
use crate::schema::{ColumnInfo, TableList};

const DESCRIBE_TABLE: &str = r#"
    SELECT name, type AS sql_type, "notnull" AS not_null, pk
    FROM pragma_table_info(?1)
    ORDER BY cid"#;

const LIST_TABLES: &str = r"
    SELECT name
    FROM sqlite_master
    WHERE type = 'table'
      AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
    ORDER BY name";

#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    name: String,
    sql_type: String,
    not_null: i64,
    /// 1-based position inside the primary key, 0 otherwise.
    pk: i64,
}

impl From<ColumnRow> for ColumnInfo {
    fn from(row: ColumnRow) -> Self {
        ColumnInfo {
            name: row.name,
            sql_type: row.sql_type,
            nullable: row.not_null == 0,
            is_primary_key: row.pk > 0,
            comment: String::new(),
        }
    }
}

pub struct SqliteReader {
    pool: SqlitePool,
}

impl SqliteReader {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(connection_error(Dialect::Sqlite))?;

        let mut conn = pool
            .acquire()
            .await
            .map_err(connection_error(Dialect::Sqlite))?;
        conn.ping().await.map_err(connection_error(Dialect::Sqlite))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SchemaReader for SqliteReader {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn list_tables(&self) -> Result<TableList> {
        let rows: Vec<(String,)> = sqlx::query_as(LIST_TABLES).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows: Vec<ColumnRow> = sqlx::query_as(DESCRIBE_TABLE)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ColumnInfo::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
