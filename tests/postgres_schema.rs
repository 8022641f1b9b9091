//! Schema reading against a live Postgres server.
//!
//! Runs only when `SLINTGEN_PG_URL` points at a database the tests may create
//! and drop tables in, e.g. `postgres://postgres@localhost:5432/postgres`.

use slintgen::*;
use sqlx::postgres::PgPool;

const SCHEMA: &str = r#"
    DROP TABLE IF EXISTS "UserAccounts";
    DROP SCHEMA IF EXISTS slintgen_hidden CASCADE;
    CREATE TABLE "UserAccounts" (
        "Id" BIGINT PRIMARY KEY,
        "DisplayName" TEXT,
        created_at TIMESTAMP NOT NULL
    );
    COMMENT ON COLUMN "UserAccounts"."DisplayName" IS 'shown in the header';
    CREATE SCHEMA slintgen_hidden;
    CREATE TABLE slintgen_hidden.invoices (id INTEGER PRIMARY KEY);
"#;

const TEARDOWN: &str = r#"
    DROP TABLE IF EXISTS "UserAccounts";
    DROP SCHEMA IF EXISTS slintgen_hidden CASCADE;
"#;

fn database_url() -> Option<String> {
    let url = std::env::var("SLINTGEN_PG_URL").ok()?;
    (!url.is_empty()).then_some(url)
}

async fn setup(url: &str) -> PgPool {
    let pool = PgPool::connect(url).await.unwrap();
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    pool
}

async fn teardown(pool: PgPool) {
    sqlx::raw_sql(TEARDOWN).execute(&pool).await.unwrap();
    pool.close().await;
}

// Both cases share one test so they never race on the same tables.
#[tokio::test]
async fn listed_tables_can_all_be_described() {
    let Some(url) = database_url() else {
        eprintln!("SLINTGEN_PG_URL not set, skipping");
        return;
    };
    let pool = setup(&url).await;

    let reader = connect("postgres", &url).await.unwrap();
    let tables = reader.list_tables().await.unwrap();
    assert!(tables.contains("UserAccounts"), "{tables:?}");
    // outside the search_path, so not reachable by bare name
    assert!(!tables.contains("invoices"), "{tables:?}");

    let columns = reader.describe_table("UserAccounts").await.unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Id", "DisplayName", "created_at"]);
    assert!(columns[0].is_primary_key);
    assert!(!columns[0].nullable);
    assert!(columns[1].nullable);
    assert_eq!(columns[1].comment, "shown in the header");

    // lower-cased lookups do not fold onto the quoted name
    assert!(reader.describe_table("useraccounts").await.unwrap().is_empty());

    for table in &tables {
        reader
            .describe_table(table)
            .await
            .unwrap_or_else(|e| panic!("{table}: {e}"));
    }

    let dir = tempfile::tempdir().unwrap();
    let generated = Generator::new(reader.as_ref(), &GeneratorConfig::default())
        .generate_all(dir.path())
        .await
        .unwrap();
    assert_eq!(generated.len(), tables.len());
    let source = std::fs::read_to_string(dir.path().join("UserAccounts_model.go")).unwrap();
    assert!(source.contains("type UserAccounts struct {\n"));

    reader.close().await;
    teardown(pool).await;
}
