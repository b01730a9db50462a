use super::{Conditions, SqlValue, year_month_text};
use crate::model::transaction::{NewTransaction, Transaction};
use chrono::{Datelike, Local};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Appends a ledger row. Returns `None` without writing when the worker does not exist.
pub async fn add_transaction(
    pool: &SqlitePool,
    entry: &NewTransaction,
) -> Result<Option<i64>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM workers WHERE id = ?")
        .bind(entry.worker_id)
        .fetch_optional(&mut *tx)
        .await?;

    if owner.is_none() {
        warn!(worker_id = entry.worker_id, "Transaction refused, worker not found");
        return Ok(None);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO transactions (worker_id, date, amount, transaction_type)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(entry.worker_id)
    .bind(entry.date)
    .bind(entry.amount)
    .bind(entry.transaction_type)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let transaction_id = result.last_insert_rowid();
    info!(
        transaction_id,
        worker_id = entry.worker_id,
        amount = entry.amount,
        kind = %entry.transaction_type,
        "Transaction added"
    );
    Ok(Some(transaction_id))
}

/// Lists ledger rows. Without a worker the whole table is returned; with one, `year` and
/// `month` (both required) narrow it to that calendar month.
pub async fn list_transactions(
    pool: &SqlitePool,
    worker_id: Option<i64>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<Transaction>, sqlx::Error> {
    let mut conditions = Conditions::default();

    if let Some(worker_id) = worker_id {
        conditions.push("worker_id = ?", [SqlValue::I64(worker_id)]);

        if let (Some(year), Some(month)) = (year, month) {
            conditions.push(
                "strftime('%Y', date) = ? AND strftime('%m', date) = ?",
                year_month_text(year, month),
            );
        }
    }

    let sql = format!(
        "SELECT id, worker_id, date, amount, transaction_type FROM transactions {} ORDER BY id",
        conditions.where_clause()
    );
    debug!(sql = %sql, bindings = ?conditions.values(), "Fetching transactions");

    conditions
        .bind_all(sqlx::query_as::<_, Transaction>(&sql))
        .fetch_all(pool)
        .await
}

/// Sum of every amount, advances and payouts alike, dated in the given month.
pub async fn total_paid_out_in_month(
    pool: &SqlitePool,
    year: i32,
    month: u32,
) -> Result<f64, sqlx::Error> {
    let mut conditions = Conditions::default();
    conditions.push(
        "strftime('%Y', date) = ? AND strftime('%m', date) = ?",
        year_month_text(year, month),
    );

    let sql = format!(
        "SELECT COALESCE(SUM(amount), 0.0) FROM transactions {}",
        conditions.where_clause()
    );

    conditions
        .bind_scalar(sqlx::query_scalar::<_, f64>(&sql))
        .fetch_one(pool)
        .await
}

pub async fn total_paid_out_this_month(pool: &SqlitePool) -> Result<f64, sqlx::Error> {
    let today = Local::now().date_naive();
    total_paid_out_in_month(pool, today.year(), today.month()).await
}

/// First year with a ledger entry, or the current year for an empty ledger.
pub async fn earliest_transaction_year(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let earliest: Option<String> =
        sqlx::query_scalar("SELECT MIN(strftime('%Y', date)) FROM transactions")
            .fetch_one(pool)
            .await?;

    Ok(earliest
        .and_then(|year| year.parse().ok())
        .unwrap_or_else(|| Local::now().year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_test_db;
    use crate::model::transaction::TransactionType;
    use crate::store::workers::add_worker;
    use crate::store::workers::tests::{date, sample_worker};

    async fn record(pool: &SqlitePool, worker_id: i64, on: chrono::NaiveDate, amount: f64, kind: TransactionType) {
        add_transaction(
            pool,
            &NewTransaction {
                worker_id,
                date: on,
                amount,
                transaction_type: kind,
            },
        )
        .await
        .unwrap()
        .expect("worker exists");
    }

    #[actix_web::test]
    async fn transaction_for_unknown_worker_is_refused() {
        let pool = init_test_db().await;

        let id = add_transaction(
            &pool,
            &NewTransaction {
                worker_id: 9,
                date: date(2026, 10, 1),
                amount: 50.0,
                transaction_type: TransactionType::Payout,
            },
        )
        .await
        .unwrap();

        assert!(id.is_none());
        assert!(list_transactions(&pool, None, None, None).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn month_filter_returns_only_that_workers_month() {
        let pool = init_test_db().await;
        let ali = add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let abu = add_worker(&pool, &sample_worker("Abu", 1500.0)).await.unwrap();

        record(&pool, ali, date(2026, 3, 1), 100.0, TransactionType::Advance).await;
        record(&pool, ali, date(2026, 3, 31), 200.0, TransactionType::Payout).await;
        record(&pool, ali, date(2026, 4, 1), 300.0, TransactionType::Payout).await;
        record(&pool, ali, date(2025, 3, 15), 400.0, TransactionType::Payout).await;
        record(&pool, abu, date(2026, 3, 10), 500.0, TransactionType::Advance).await;

        let march = list_transactions(&pool, Some(ali), Some(2026), Some(3)).await.unwrap();
        let amounts: Vec<f64> = march.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![100.0, 200.0]);
        assert!(march.iter().all(|t| t.worker_id == ali));

        assert_eq!(list_transactions(&pool, Some(ali), None, None).await.unwrap().len(), 4);
        assert_eq!(list_transactions(&pool, None, None, None).await.unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn period_without_worker_is_ignored() {
        let pool = init_test_db().await;
        let ali = add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        record(&pool, ali, date(2026, 3, 1), 100.0, TransactionType::Advance).await;
        record(&pool, ali, date(2025, 1, 1), 100.0, TransactionType::Advance).await;

        let all = list_transactions(&pool, None, Some(2026), Some(3)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[actix_web::test]
    async fn stored_rows_keep_their_fields() {
        let pool = init_test_db().await;
        let ali = add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        record(&pool, ali, date(2026, 2, 28), 75.5, TransactionType::Payout).await;

        let rows = list_transactions(&pool, Some(ali), Some(2026), Some(2)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(2026, 2, 28));
        assert_eq!(rows[0].amount, 75.5);
        assert_eq!(rows[0].transaction_type, TransactionType::Payout);
    }

    #[actix_web::test]
    async fn total_paid_out_is_zero_on_empty_ledger() {
        let pool = init_test_db().await;
        assert_eq!(total_paid_out_this_month(&pool).await.unwrap(), 0.0);
        assert_eq!(total_paid_out_in_month(&pool, 2026, 1).await.unwrap(), 0.0);
    }

    #[actix_web::test]
    async fn total_paid_out_sums_every_type_in_the_month() {
        let pool = init_test_db().await;
        let ali = add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let abu = add_worker(&pool, &sample_worker("Abu", 1500.0)).await.unwrap();
        let today = Local::now().date_naive();

        record(&pool, ali, today, 200.0, TransactionType::Advance).await;
        record(&pool, abu, today, 300.25, TransactionType::Payout).await;
        record(&pool, abu, date(2001, 1, 1), 999.0, TransactionType::Payout).await;

        assert_eq!(total_paid_out_this_month(&pool).await.unwrap(), 500.25);
    }

    #[actix_web::test]
    async fn earliest_year_falls_back_to_current_year() {
        let pool = init_test_db().await;
        assert_eq!(earliest_transaction_year(&pool).await.unwrap(), Local::now().year());

        let ali = add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        record(&pool, ali, date(2023, 6, 1), 10.0, TransactionType::Advance).await;
        record(&pool, ali, date(2021, 12, 31), 10.0, TransactionType::Advance).await;

        assert_eq!(earliest_transaction_year(&pool).await.unwrap(), 2021);
    }
}
