use crate::{
    error::AppError,
    model::{transaction::Transaction, worker::Worker},
    report::{self, MonthlyReport, Period},
    store::{transactions, workers},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PeriodQuery {
    /// Calendar year, e.g. 2026
    #[schema(example = 2026)]
    pub year: Option<i32>,
    /// Month number 1-12
    #[schema(example = 10)]
    pub month: Option<u32>,
}

impl PeriodQuery {
    /// Both parts or neither; a lone year or month is rejected.
    fn period(&self) -> Result<Option<Period>, AppError> {
        match (self.year, self.month) {
            (None, None) => Ok(None),
            (Some(year), Some(month)) => Period::new(year, month)
                .map(Some)
                .ok_or_else(|| AppError::InvalidInput(format!("Invalid month {month}"))),
            _ => Err(AppError::InvalidInput(
                "year and month must be given together".to_string(),
            )),
        }
    }
}

/// List workers
#[utoipa::path(
    get,
    path = "/api/workers",
    responses(
        (status = 200, description = "All workers in insertion order", body = [Worker])
    ),
    tag = "Worker"
)]
pub async fn list_workers(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Get worker by ID
#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}",
    params(
        ("worker_id", Path, description = "Worker ID")
    ),
    responses(
        (status = 200, description = "Worker found", body = Worker),
        (status = 404, description = "Worker not found", body = Object, example = json!({
            "message": "Unable to retrieve worker data for ID 7."
        }))
    ),
    tag = "Worker"
)]
pub async fn get_worker(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let worker_id = path.into_inner();

    match workers::get_worker(pool.get_ref(), worker_id).await? {
        Some(worker) => Ok(HttpResponse::Ok().json(worker)),
        None => Err(AppError::worker_not_found(worker_id)),
    }
}

/// Worker ledger, optionally limited to one month
#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}/transactions",
    params(
        ("worker_id", Path, description = "Worker ID"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "Ledger rows in insertion order", body = [Transaction]),
        (status = 400, description = "Incomplete or invalid period"),
        (status = 404, description = "Worker not found")
    ),
    tag = "Transaction"
)]
pub async fn list_worker_transactions(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<PeriodQuery>,
) -> Result<impl Responder, AppError> {
    let worker_id = path.into_inner();
    let period = query.period()?;

    if workers::get_worker(pool.get_ref(), worker_id).await?.is_none() {
        return Err(AppError::worker_not_found(worker_id));
    }

    let rows: Vec<Transaction> = transactions::list_transactions(
        pool.get_ref(),
        Some(worker_id),
        period.map(|p| p.year),
        period.map(|p| p.month),
    )
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Monthly report for a worker (defaults to the current month)
#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}/report",
    params(
        ("worker_id", Path, description = "Worker ID"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "Totals and remaining salary", body = MonthlyReport),
        (status = 400, description = "Incomplete or invalid period"),
        (status = 404, description = "Worker not found")
    ),
    tag = "Report"
)]
pub async fn worker_report(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<PeriodQuery>,
) -> Result<impl Responder, AppError> {
    let worker_id = path.into_inner();
    let period = query
        .period()?
        .unwrap_or_else(|| Period::containing(Local::now().date_naive()));

    match report::monthly_report(pool.get_ref(), worker_id, period).await? {
        Some(report) => Ok(HttpResponse::Ok().json(report)),
        None => Err(AppError::worker_not_found(worker_id)),
    }
}
