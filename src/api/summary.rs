use crate::{
    error::AppError,
    report::{self, Summary},
};
use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;

/// Home-page metrics
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Worker count, salary total and this month's paid out", body = Summary)
    ),
    tag = "Report"
)]
pub async fn get_summary(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let summary = report::summary(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
