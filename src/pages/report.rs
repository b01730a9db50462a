use super::{Menu, NO_WORKERS, Notice, PageResult, layout, pick_worker, worker_select};
use crate::{
    config::Config,
    error::AppError,
    model::worker::Worker,
    report::{self, MonthlyReport, Period, period_options},
    store::transactions,
};
use actix_web::web;
use chrono::Local;
use maud::{Markup, html};
use serde::Deserialize;
use sqlx::SqlitePool;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub worker_id: Option<i64>,
    /// `YYYY-MM`
    pub period: Option<String>,
}

fn selectors(all: &[Worker], worker_id: i64, options: &[Period], chosen: Period) -> Markup {
    html! {
        form method="get" action=(Menu::Report.path()) onchange="this.submit()" {
            (worker_select(all, Some(worker_id), "Select Worker"))
            label for="period" { "Select Month" }
            select id="period" name="period" {
                @for choice in options {
                    option value=(choice.key()) selected[*choice == chosen] { (choice.label()) }
                }
            }
            noscript { button type="submit" { "Show" } }
        }
    }
}

fn report_body(config: &Config, report: &MonthlyReport) -> Markup {
    html! {
        p { "Transaction Details for " (report.worker_name) }
        table {
            thead { tr { th { "date" } th { "amount" } th { "transaction_type" } } }
            tbody {
                @for row in &report.transactions {
                    tr {
                        td { (row.date.to_string()) }
                        td { (format!("{:.2}", row.amount)) }
                        td { (row.transaction_type.to_string()) }
                    }
                }
            }
        }
        p { "Base Salary: " (config.money(report.base_salary)) }
        p { "Total Payout: " (config.money(report.total_payout)) }
        p { "Total Advance: " (config.money(report.total_advance)) }
        p { "Remaining: " (config.money(report.remaining)) }
    }
}

pub async fn report_page(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<ReportQuery>,
) -> PageResult {
    let all = crate::store::workers::list_workers(pool.get_ref()).await?;

    let worker = match pick_worker(&all, query.worker_id) {
        _ if all.is_empty() => {
            let content = Notice::Warning(NO_WORKERS.to_string()).render();
            return Ok(layout(&config, Menu::Report, "Transactions Report", content));
        }
        Ok(Some(worker)) => worker,
        Ok(None) | Err(_) => {
            let missing = query.worker_id.unwrap_or_default();
            let content = html! {
                (Notice::from(AppError::worker_not_found(missing)).render())
                form method="get" action=(Menu::Report.path()) onchange="this.submit()" {
                    (worker_select(&all, None, "Select Worker"))
                }
            };
            return Ok(layout(&config, Menu::Report, "Transactions Report", content));
        }
    };

    let today = Local::now().date_naive();
    let options = period_options(transactions::earliest_transaction_year(pool.get_ref()).await?, today);

    let mut alerts = Vec::new();
    let period = match query.period.as_deref().map(Period::parse) {
        None => Period::containing(today),
        Some(Some(period)) if options.contains(&period) => period,
        Some(_) => {
            alerts.push(Notice::Error("Invalid month selection".to_string()));
            Period::containing(today)
        }
    };

    let body = match report::monthly_report(pool.get_ref(), worker.id, period).await? {
        Some(report) => report_body(&config, &report),
        None => Notice::from(AppError::worker_not_found(worker.id)).render(),
    };

    let content = html! {
        @for alert in &alerts { (alert.render()) }
        (selectors(&all, worker.id, &options, period))
        (body)
    };
    Ok(layout(&config, Menu::Report, "Transactions Report", content))
}
