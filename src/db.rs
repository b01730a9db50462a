use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const CREATE_WORKERS: &str = r#"
CREATE TABLE IF NOT EXISTS workers (
    id INTEGER PRIMARY KEY,
    name TEXT,
    join_date DATE,
    gender TEXT,
    phone TEXT,
    passport_number TEXT,
    passport_expiry DATE,
    visa_expiry DATE,
    company_name TEXT,
    address TEXT,
    state TEXT,
    pic_details TEXT,
    company_join_date DATE,
    base_salary REAL
)
"#;

// worker_id carries no foreign key; add_transaction checks the owner instead
const CREATE_TRANSACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    worker_id INTEGER,
    date DATE,
    amount REAL,
    transaction_type TEXT
)
"#;

/// Opens (creating if absent) the ledger database and makes sure both tables exist.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    info!(database_url, "Database ready");

    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_WORKERS).execute(pool).await?;
    sqlx::query(CREATE_TRANSACTIONS).execute(pool).await?;
    Ok(())
}

/// Single-connection in-memory database; the connection never expires so the data survives the test.
#[cfg(test)]
pub async fn init_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    create_schema(&pool)
        .await
        .expect("Failed to create schema");
    pool
}
