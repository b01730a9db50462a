use crate::model::worker::{Worker, WorkerFields};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub async fn add_worker(pool: &SqlitePool, fields: &WorkerFields) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO workers
        (name, join_date, gender, phone, passport_number, passport_expiry, visa_expiry,
         company_name, address, state, pic_details, company_join_date, base_salary)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(fields.join_date)
    .bind(fields.gender)
    .bind(&fields.phone)
    .bind(&fields.passport_number)
    .bind(fields.passport_expiry)
    .bind(fields.visa_expiry)
    .bind(&fields.company_name)
    .bind(&fields.address)
    .bind(fields.state)
    .bind(&fields.pic_details)
    .bind(fields.company_join_date)
    .bind(fields.base_salary)
    .execute(pool)
    .await?;

    let worker_id = result.last_insert_rowid();
    info!(worker_id, name = %fields.name, "Worker added");
    Ok(worker_id)
}

/// Replaces every column of the worker. Returns the number of rows touched, 0 when the id is unknown.
pub async fn update_worker(
    pool: &SqlitePool,
    worker_id: i64,
    fields: &WorkerFields,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE workers
        SET name = ?, join_date = ?, gender = ?, phone = ?, passport_number = ?,
            passport_expiry = ?, visa_expiry = ?, company_name = ?, address = ?, state = ?,
            pic_details = ?, company_join_date = ?, base_salary = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(fields.join_date)
    .bind(fields.gender)
    .bind(&fields.phone)
    .bind(&fields.passport_number)
    .bind(fields.passport_expiry)
    .bind(fields.visa_expiry)
    .bind(&fields.company_name)
    .bind(&fields.address)
    .bind(fields.state)
    .bind(&fields.pic_details)
    .bind(fields.company_join_date)
    .bind(fields.base_salary)
    .bind(worker_id)
    .execute(pool)
    .await?;

    info!(worker_id, affected = result.rows_affected(), "Worker updated");
    Ok(result.rows_affected())
}

/// Deletes the worker and its ledger in one transaction. Returns the number of worker rows removed.
pub async fn delete_worker(pool: &SqlitePool, worker_id: i64) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let workers = sqlx::query("DELETE FROM workers WHERE id = ?")
        .bind(worker_id)
        .execute(&mut *tx)
        .await?;

    let transactions = sqlx::query("DELETE FROM transactions WHERE worker_id = ?")
        .bind(worker_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        worker_id,
        transactions = transactions.rows_affected(),
        "Worker deleted"
    );
    Ok(workers.rows_affected())
}

pub async fn list_workers(pool: &SqlitePool) -> Result<Vec<Worker>, sqlx::Error> {
    debug!("Fetching workers");
    sqlx::query_as::<_, Worker>("SELECT * FROM workers ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get_worker(pool: &SqlitePool, worker_id: i64) -> Result<Option<Worker>, sqlx::Error> {
    debug!(worker_id, "Fetching worker");
    sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = ?")
        .bind(worker_id)
        .fetch_optional(pool)
        .await
}
