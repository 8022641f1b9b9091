use async_trait::async_trait;
use sqlx::Connection;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::dialect::Dialect;
use crate::error::Result;
use crate::reader::{SchemaReader, connection_error};
use crate::schema::{ColumnInfo, TableList};

// Both queries only see tables reachable by bare name through the
// search_path, so every listed name can be described. Names are compared
// verbatim with relname, which keeps mixed-case tables intact.
//
// Every column of a composite primary key is reported as primary.
const DESCRIBE_TABLE: &str = "
    SELECT
        a.attname::text AS name,
        pg_catalog.format_type(a.atttypid, a.atttypmod) AS sql_type,
        a.attnotnull AS not_null,
        EXISTS (
            SELECT 1
            FROM pg_catalog.pg_constraint p
            WHERE p.conrelid = a.attrelid
              AND p.contype = 'p'
              AND a.attnum = ANY (p.conkey)
        ) AS is_primary_key,
        pg_catalog.col_description(a.attrelid, a.attnum) AS comment
    FROM pg_catalog.pg_attribute a
    JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
    WHERE c.relname = $1
      AND c.relkind IN ('r', 'p')
      AND pg_catalog.pg_table_is_visible(c.oid)
      AND a.attnum > 0
      AND NOT a.attisdropped
    ORDER BY a.attnum";

const LIST_TABLES: &str = "
    SELECT c.relname::text
    FROM pg_catalog.pg_class c
    JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
    WHERE n.nspname NOT IN ('pg_catalog', 'information_schema')
      AND c.relkind IN ('r', 'p')
      AND pg_catalog.pg_table_is_visible(c.oid)
    ORDER BY c.relname";

#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    name: String,
    sql_type: String,
    not_null: bool,
    is_primary_key: bool,
    comment: Option<String>,
}

impl From<ColumnRow> for ColumnInfo {
    fn from(row: ColumnRow) -> Self {
        ColumnInfo {
            name: row.name,
            sql_type: row.sql_type,
            nullable: !row.not_null,
            is_primary_key: row.is_primary_key,
            comment: row.comment.unwrap_or_default(),
        }
    }
}

pub struct PostgresReader {
    pool: PgPool,
}

impl PostgresReader {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(connection_error(Dialect::Postgres))?;

        let mut conn = pool
            .acquire()
            .await
            .map_err(connection_error(Dialect::Postgres))?;
        conn.ping()
            .await
            .map_err(connection_error(Dialect::Postgres))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SchemaReader for PostgresReader {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_is_inverse_of_attnotnull() {
        let column = ColumnInfo::from(ColumnRow {
            name: "email".into(),
            sql_type: "character varying(255)".into(),
            not_null: false,
            is_primary_key: false,
            comment: Some("login address".into()),
        });
        assert!(column.nullable);
        assert!(!column.is_primary_key);
        assert_eq!(column.comment, "login address");

        let column = ColumnInfo::from(ColumnRow {
            name: "id".into(),
            sql_type: "integer".into(),
            not_null: true,
            is_primary_key: true,
            comment: None,
        });
        assert!(!column.nullable);
        assert!(column.is_primary_key);
        assert_eq!(column.comment, "");
    }
}
