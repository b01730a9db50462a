//! Derived figures: the monthly per-worker report and the home-page summary.

use crate::model::transaction::{Transaction, TransactionType};
use crate::model::worker::Worker;
use crate::store::{transactions, workers};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, written `2026-10` in query strings and shown as `2026-Oct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.year, MONTH_ABBREVIATIONS[(self.month - 1) as usize])
    }

    pub fn parse(key: &str) -> Option<Self> {
        let (year, month) = key.split_once('-')?;
        Self::new(year.trim().parse().ok()?, month.trim().parse().ok()?)
    }
}

/// Every month from the current year back to `earliest_year`, newest year first and
/// January to December within a year.
pub fn period_options(earliest_year: i32, today: NaiveDate) -> Vec<Period> {
    let current = today.year();
    let first = earliest_year.min(current);

    (first..=current)
        .rev()
        .flat_map(|year| (1..=12).map(move |month| Period { year, month }))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub worker_id: i64,
    pub worker_name: String,
    pub period: Period,
    pub transactions: Vec<Transaction>,
    pub base_salary: f64,
    pub total_payout: f64,
    pub total_advance: f64,
    /// May go negative; nothing caps advances against the salary.
    pub remaining: f64,
}

impl MonthlyReport {
    pub fn build(worker: &Worker, period: Period, transactions: Vec<Transaction>) -> Self {
        let total_of = |kind: TransactionType| -> f64 {
            transactions
                .iter()
                .filter(|t| t.transaction_type == kind)
                .map(|t| t.amount)
                .sum()
        };

        let total_payout = total_of(TransactionType::Payout);
        let total_advance = total_of(TransactionType::Advance);
        let base_salary = worker.fields.base_salary;

        Self {
            worker_id: worker.id,
            worker_name: worker.fields.name.clone(),
            period,
            transactions,
            base_salary,
            total_payout,
            total_advance,
            remaining: base_salary - total_payout - total_advance,
        }
    }
}

/// Loads the report for one worker and month; `None` when the worker is gone.
pub async fn monthly_report(
    pool: &SqlitePool,
    worker_id: i64,
    period: Period,
) -> Result<Option<MonthlyReport>, sqlx::Error> {
    let Some(worker) = workers::get_worker(pool, worker_id).await? else {
        return Ok(None);
    };

    let rows = transactions::list_transactions(
        pool,
        Some(worker_id),
        Some(period.year),
        Some(period.month),
    )
    .await?;

    Ok(Some(MonthlyReport::build(&worker, period, rows)))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    #[schema(example = 12)]
    pub worker_count: usize,
    #[schema(example = 18000.0)]
    pub total_salary: f64,
    #[schema(example = 2500.0)]
    pub paid_out_this_month: f64,
}

pub async fn summary(pool: &SqlitePool) -> Result<Summary, sqlx::Error> {
    let all = workers::list_workers(pool).await?;

    Ok(Summary {
        worker_count: all.len(),
        total_salary: all.iter().map(|w| w.fields.base_salary).sum(),
        paid_out_this_month: transactions::total_paid_out_this_month(pool).await?,
    })
}
