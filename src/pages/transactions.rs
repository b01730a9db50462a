use super::{Menu, NO_WORKERS, Notice, PageResult, Selection, layout, notices, worker_select};
use crate::{
    config::Config,
    error::AppError,
    model::{
        transaction::{NewTransaction, TransactionType},
        worker::Worker,
    },
    store::{transactions, workers},
};
use actix_web::web;
use chrono::{Local, NaiveDate};
use maud::{Markup, html};
use sqlx::SqlitePool;
use strum::IntoEnumIterator;

fn transaction_form(all: &[Worker], selected: Option<i64>, today: NaiveDate) -> Markup {
    html! {
        form method="post" action=(Menu::Transactions.path()) {
            (worker_select(all, selected, "Select Worker"))
            label { "Amount" }
            input type="number" name="amount" min="0" step="0.01" value="0.00" required;
            label { "Transaction Type" }
            select name="transaction_type" {
                @for kind in TransactionType::iter() {
                    option value=(kind.to_string()) { (kind.to_string()) }
                }
            }
            label { "Date" }
            input type="date" name="date" value=(today.to_string()) required;
            button type="submit" { "Add Transaction" }
        }
    }
}

fn transactions_page(config: &Config, all: &[Worker], selected: Option<i64>, alerts: &[Notice]) -> Markup {
    let content = if all.is_empty() {
        html! {
            (notices(alerts))
            (Notice::Warning(NO_WORKERS.to_string()).render())
        }
    } else {
        html! {
            (notices(alerts))
            (transaction_form(all, selected, Local::now().date_naive()))
        }
    };
    layout(config, Menu::Transactions, "Advance & Payout", content)
}

pub async fn transaction_form_page(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<Selection>,
) -> PageResult {
    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(transactions_page(&config, &all, query.worker_id, &[]))
}

pub async fn transaction_submit(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    form: web::Form<NewTransaction>,
) -> PageResult {
    let entry = form.into_inner();

    let alert = if !entry.amount.is_finite() || entry.amount < 0.0 {
        AppError::InvalidInput("Amount must be zero or more".to_string()).into()
    } else {
        match transactions::add_transaction(pool.get_ref(), &entry).await? {
            Some(_) => Notice::Success("Transaction added successfully!".to_string()),
            None => AppError::worker_not_found(entry.worker_id).into(),
        }
    };

    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(transactions_page(&config, &all, Some(entry.worker_id), &[alert]))
}
