use super::{Menu, PageResult, layout};
use crate::{config::Config, report};
use actix_web::web;
use chrono::Local;
use maud::html;
use sqlx::SqlitePool;

pub async fn index(pool: web::Data<SqlitePool>, config: web::Data<Config>) -> PageResult {
    let summary = report::summary(pool.get_ref()).await?;
    let current_month = Local::now().format("%B,%Y").to_string();

    let metrics = [
        (
            "Number of Workers",
            summary.worker_count.to_string(),
            format!("Working with {}", config.organization),
        ),
        (
            "Total Salary",
            config.money(summary.total_salary),
            "For All Workers".to_string(),
        ),
        (
            "Paid Out",
            config.money(summary.paid_out_this_month),
            format!("Total to Date: {current_month}"),
        ),
    ];

    let content = html! {
        div.metrics {
            @for (title, value, caption) in &metrics {
                div.metric {
                    div { (title) }
                    div.value { (value) }
                    div.caption { (caption) }
                }
            }
        }
    };

    Ok(layout(&config, Menu::Home, "Overview", content))
}
