//! Server-rendered operator screens. Every menu entry is a stateless page: it renders,
//! optionally accepts one form submission, performs a single storage call and renders again.

pub mod home;
pub mod report;
pub mod transactions;
pub mod workers;

use crate::config::Config;
use crate::error::AppError;
use crate::model::worker::Worker;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Deserialize;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const NO_WORKERS: &str = "No workers found in the database. Please add a worker first.";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }
nav { background: #f0f2f6; padding: 1rem; min-width: 14rem; }
nav a { display: block; padding: .4rem .6rem; color: #262730; text-decoration: none; border-radius: .3rem; }
nav a.active { background: #ff4b4b; color: white; }
main { padding: 1.5rem 2.5rem; flex: 1; max-width: 60rem; }
.alert { padding: .75rem 1rem; border-radius: .3rem; margin: .75rem 0; }
.alert.success { background: #d4edda; }
.alert.warning { background: #fff3cd; }
.alert.error { background: #f8d7da; }
.columns { display: flex; gap: 2rem; }
.columns > div { flex: 1; }
label { display: block; margin-top: .6rem; font-size: .9rem; }
input, select, textarea { width: 100%; padding: .35rem; box-sizing: border-box; }
input[type=radio] { width: auto; }
button { margin-top: 1rem; padding: .45rem 1.2rem; }
.metrics { display: flex; gap: 2rem; }
.metric .value { font-size: 2rem; }
.metric .caption { color: #09ab3b; font-size: .85rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid #ddd; padding: .35rem .6rem; text-align: left; }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Menu {
    Home,
    AddWorker,
    UpdateWorker,
    DeleteWorker,
    ViewWorker,
    Transactions,
    Report,
}

impl Menu {
    pub fn label(&self) -> &'static str {
        match self {
            Menu::Home => "🏠 Home",
            Menu::AddWorker => "👨‍🦱 Add Worker Info",
            Menu::UpdateWorker => "⚙️ Update Worker Info",
            Menu::DeleteWorker => "Delete Worker",
            Menu::ViewWorker => "👀 View Workers Info",
            Menu::Transactions => "💵 Transactions",
            Menu::Report => "📊 Report",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Menu::Home => "/",
            Menu::AddWorker => "/workers/add",
            Menu::UpdateWorker => "/workers/update",
            Menu::DeleteWorker => "/workers/delete",
            Menu::ViewWorker => "/workers/view",
            Menu::Transactions => "/transactions",
            Menu::Report => "/report",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn render(&self) -> Markup {
        let (class, text) = match self {
            Notice::Success(t) => ("alert success", t),
            Notice::Warning(t) => ("alert warning", t),
            Notice::Error(t) => ("alert error", t),
        };
        html! { div class=(class) { (text) } }
    }
}

impl From<AppError> for Notice {
    fn from(e: AppError) -> Self {
        Notice::Error(e.public_message())
    }
}

pub fn layout(config: &Config, active: Menu, heading: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.page_title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    strong { "Menu" }
                    @for item in Menu::iter() {
                        a class=(if item == active { "active" } else { "" }) href=(item.path()) { (item.label()) }
                    }
                }
                main {
                    h1 { (config.page_title) " 🙎‍♂️" }
                    h2 { (heading) }
                    (content)
                }
            }
        }
    }
}

pub fn notices(notices: &[Notice]) -> Markup {
    html! {
        @for notice in notices {
            (notice.render())
        }
    }
}

/// `?worker_id=` on every page that works on one worker.
#[derive(Debug, Default, Deserialize)]
pub struct Selection {
    pub worker_id: Option<i64>,
}

/// Selection-list labels. Names are shown as-is unless another worker shares them,
/// in which case the id is appended so the operator can tell them apart.
pub fn worker_options(workers: &[Worker]) -> Vec<(i64, String)> {
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for worker in workers {
        *name_counts.entry(worker.fields.name.as_str()).or_default() += 1;
    }

    workers
        .iter()
        .map(|w| {
            let name = w.fields.name.as_str();
            let label = if name_counts.get(name).copied().unwrap_or(0) > 1 {
                format!("{name} (#{})", w.id)
            } else {
                name.to_string()
            };
            (w.id, label)
        })
        .collect()
}

/// The worker a page should show: the requested id, or the first worker when nothing was asked for.
/// `Err` carries the id that no longer exists.
pub fn pick_worker(workers: &[Worker], requested: Option<i64>) -> Result<Option<&Worker>, i64> {
    match requested {
        Some(id) => workers.iter().find(|w| w.id == id).map(Some).ok_or(id),
        None => Ok(workers.first()),
    }
}

pub fn worker_select(workers: &[Worker], selected: Option<i64>, label: &str) -> Markup {
    html! {
        label for="worker_id" { (label) }
        select id="worker_id" name="worker_id" {
            @for (id, text) in worker_options(workers) {
                option value=(id) selected[Some(id) == selected] { (text) }
            }
        }
    }
}

/// A GET form that reloads `action` for the chosen worker.
pub fn worker_picker(action: &str, workers: &[Worker], selected: Option<i64>, label: &str) -> Markup {
    html! {
        form method="get" action=(action) onchange="this.submit()" {
            (worker_select(workers, selected, label))
            noscript { button type="submit" { "Select" } }
        }
    }
}

/// Error raised while building a page. Rendered as a standalone HTML error page.
#[derive(Debug, derive_more::Display)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl From<sqlx::Error> for PageError {
    fn from(e: sqlx::Error) -> Self {
        PageError(AppError::from(e))
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let page = html! {
            (DOCTYPE)
            html lang="en" {
                head { meta charset="utf-8"; title { "Error" } style { (PreEscaped(STYLE)) } }
                body {
                    main {
                        h2 { "Something went wrong" }
                        (Notice::Error(self.0.public_message()).render())
                        a href="/" { "Back to Home" }
                    }
                }
            }
        };

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(page.into_string())
    }
}

pub type PageResult = Result<Markup, PageError>;
