use super::{Menu, NO_WORKERS, Notice, PageResult, Selection, layout, notices, pick_worker, worker_picker};
use crate::{
    config::Config,
    error::AppError,
    model::worker::{Gender, State, Worker, WorkerFields},
    store::workers,
};
use actix_web::web;
use chrono::Local;
use maud::{Markup, html};
use serde::Deserialize;
use sqlx::SqlitePool;
use strum::IntoEnumIterator;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub worker_id: i64,
}

fn validate(fields: &WorkerFields) -> Result<(), AppError> {
    if !fields.base_salary.is_finite() || fields.base_salary < 0.0 {
        return Err(AppError::InvalidInput(
            "Base salary must be zero or more".to_string(),
        ));
    }
    Ok(())
}

fn worker_form(action: &str, submit: &str, f: &WorkerFields) -> Markup {
    html! {
        form method="post" action=(action) {
            div.columns {
                div {
                    label { "Worker Name" }
                    input type="text" name="name" placeholder="Enter worker name" value=(f.name);
                    label { "Employee Join Date" }
                    input type="date" name="join_date" required value=(f.join_date.to_string());
                    label { "Gender" }
                    @for gender in Gender::iter() {
                        label {
                            input type="radio" name="gender" value=(gender.to_string()) checked[gender == f.gender];
                            " " (gender.to_string())
                        }
                    }
                    label { "Personal Phone Number" }
                    input type="text" name="phone" placeholder="Enter phone number" value=(f.phone);
                    label { "Passport Number" }
                    input type="text" name="passport_number" placeholder="Enter passport number" value=(f.passport_number);
                    label { "Passport Expiry Date" }
                    input type="date" name="passport_expiry" required value=(f.passport_expiry.to_string());
                    label { "Visa Expiry Date" }
                    input type="date" name="visa_expiry" required value=(f.visa_expiry.to_string());
                }
                div {
                    label { "Current Working Company Name" }
                    input type="text" name="company_name" placeholder="Enter company name" value=(f.company_name);
                    label { "Address" }
                    textarea name="address" placeholder="Enter address" { (f.address) }
                    label { "State" }
                    select name="state" {
                        @for state in State::iter() {
                            option value=(state.to_string()) selected[state == f.state] { (state.to_string()) }
                        }
                    }
                    label { "Current Company PIC(Person-in-Charge) Details" }
                    textarea name="pic_details" { (f.pic_details) }
                    label { "Current Company Join Date" }
                    input type="date" name="company_join_date" required value=(f.company_join_date.to_string());
                    label { "Worker Current Base Salary" }
                    input type="number" name="base_salary" min="0" step="0.01" required value=(format!("{:.2}", f.base_salary));
                }
            }
            button type="submit" { (submit) }
        }
    }
}

fn add_page(config: &Config, alerts: &[Notice], fields: &WorkerFields) -> Markup {
    let content = html! {
        (notices(alerts))
        (worker_form(Menu::AddWorker.path(), "Add Worker", fields))
    };
    layout(config, Menu::AddWorker, "Add New Worker", content)
}

pub async fn add_form(config: web::Data<Config>) -> PageResult {
    let blank = WorkerFields::blank(Local::now().date_naive());
    Ok(add_page(&config, &[], &blank))
}

pub async fn add_submit(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    form: web::Form<WorkerFields>,
) -> PageResult {
    let fields = form.into_inner();

    if let Err(e) = validate(&fields) {
        return Ok(add_page(&config, &[e.into()], &fields));
    }

    workers::add_worker(pool.get_ref(), &fields).await?;

    let blank = WorkerFields::blank(Local::now().date_naive());
    let done = Notice::Success("Worker added successfully!".to_string());
    Ok(add_page(&config, &[done], &blank))
}

/// `draft` replaces the stored record in the form after a rejected submission.
fn update_page(
    config: &Config,
    all: &[Worker],
    requested: Option<i64>,
    draft: Option<&WorkerFields>,
    mut alerts: Vec<Notice>,
) -> Markup {
    let content = match pick_worker(all, requested) {
        _ if all.is_empty() => html! {
            (notices(&alerts))
            (Notice::Warning(NO_WORKERS.to_string()).render())
        },
        Ok(Some(worker)) => {
            let action = format!("{}?worker_id={}", Menu::UpdateWorker.path(), worker.id);
            html! {
                (notices(&alerts))
                (worker_picker(Menu::UpdateWorker.path(), all, Some(worker.id), "Select Worker to Update"))
                (worker_form(&action, "Update Worker", draft.unwrap_or(&worker.fields)))
            }
        }
        Ok(None) => html! { (notices(&alerts)) },
        Err(missing) => {
            alerts.push(AppError::worker_not_found(missing).into());
            html! {
                (notices(&alerts))
                (worker_picker(Menu::UpdateWorker.path(), all, None, "Select Worker to Update"))
            }
        }
    };
    layout(config, Menu::UpdateWorker, "Update Worker Information", content)
}

pub async fn update_form(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<Selection>,
) -> PageResult {
    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(update_page(&config, &all, query.worker_id, None, Vec::new()))
}

pub async fn update_submit(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<Selection>,
    form: web::Form<WorkerFields>,
) -> PageResult {
    let fields = form.into_inner();

    let Some(worker_id) = query.worker_id else {
        let all = workers::list_workers(pool.get_ref()).await?;
        let missing = AppError::InvalidInput("No worker selected".to_string());
        return Ok(update_page(&config, &all, None, None, vec![missing.into()]));
    };

    if let Err(e) = validate(&fields) {
        let all = workers::list_workers(pool.get_ref()).await?;
        return Ok(update_page(&config, &all, Some(worker_id), Some(&fields), vec![e.into()]));
    }

    let alert = match workers::update_worker(pool.get_ref(), worker_id, &fields).await? {
        0 => {
            warn!(worker_id, "Update for missing worker");
            AppError::worker_not_found(worker_id).into()
        }
        _ => Notice::Success("Worker information updated successfully!".to_string()),
    };

    let all = workers::list_workers(pool.get_ref()).await?;
    let requested = all.iter().any(|w| w.id == worker_id).then_some(worker_id);
    Ok(update_page(&config, &all, requested, None, vec![alert]))
}

fn delete_page(config: &Config, all: &[Worker], requested: Option<i64>, mut alerts: Vec<Notice>) -> Markup {
    let content = match pick_worker(all, requested) {
        _ if all.is_empty() => html! {
            (notices(&alerts))
            (Notice::Warning(NO_WORKERS.to_string()).render())
        },
        Ok(Some(worker)) => html! {
            (notices(&alerts))
            (worker_picker(Menu::DeleteWorker.path(), all, Some(worker.id), "Select Worker to Delete"))
            (Notice::Warning(format!("Are you sure you want to delete {}?", worker.fields.name)).render())
            form method="post" action=(Menu::DeleteWorker.path()) {
                input type="hidden" name="worker_id" value=(worker.id);
                button type="submit" { "Confirm Delete" }
            }
        },
        Ok(None) => html! { (notices(&alerts)) },
        Err(missing) => {
            alerts.push(AppError::worker_not_found(missing).into());
            html! {
                (notices(&alerts))
                (worker_picker(Menu::DeleteWorker.path(), all, None, "Select Worker to Delete"))
            }
        }
    };
    layout(config, Menu::DeleteWorker, "Delete Worker", content)
}

pub async fn delete_form(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<Selection>,
) -> PageResult {
    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(delete_page(&config, &all, query.worker_id, Vec::new()))
}

pub async fn delete_submit(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    form: web::Form<DeleteForm>,
) -> PageResult {
    let worker_id = form.worker_id;

    let alert = match workers::get_worker(pool.get_ref(), worker_id).await? {
        None => AppError::worker_not_found(worker_id).into(),
        Some(worker) => {
            workers::delete_worker(pool.get_ref(), worker_id).await?;
            Notice::Success(format!(
                "{} has been deleted from the database.",
                worker.fields.name
            ))
        }
    };

    let all = workers::list_workers(pool.get_ref()).await?;
    Ok(delete_page(&config, &all, None, vec![alert]))
}

fn worker_details(config: &Config, w: &WorkerFields) -> Markup {
    let general = [
        ("Name", w.name.clone()),
        ("Join Date", w.join_date.to_string()),
        ("Gender", w.gender.to_string()),
        ("Phone", w.phone.clone()),
    ];
    let passport = [
        ("Passport Number", w.passport_number.clone()),
        ("Passport Expiry", w.passport_expiry.to_string()),
        ("Visa Expiry", w.visa_expiry.to_string()),
    ];
    let work = [
        ("Company Name", w.company_name.clone()),
        ("Address", w.address.clone()),
        ("State", w.state.to_string()),
        ("PIC Details", w.pic_details.clone()),
        ("Company Join Date", w.company_join_date.to_string()),
    ];
    let salary = [("Base Salary", config.money(w.base_salary))];

    let section = |title: &str, rows: &[(&str, String)]| {
        html! {
            h3 { (title) }
            @for (label, value) in rows {
                p { strong { (label) ":" } " " (value) }
            }
        }
    };

    html! {
        div.columns {
            div {
                (section("General Information", &general))
                (section("Passport Information", &passport))
            }
            div {
                (section("Work Related Info", &work))
                (section("Salary Info", &salary))
            }
        }
    }
}

pub async fn view(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<Selection>,
) -> PageResult {
    let all = workers::list_workers(pool.get_ref()).await?;

    let content = match pick_worker(&all, query.worker_id) {
        _ if all.is_empty() => Notice::Warning(NO_WORKERS.to_string()).render(),
        Ok(Some(worker)) => html! {
            (worker_picker(Menu::ViewWorker.path(), &all, Some(worker.id), "Select Worker to View"))
            (worker_details(&config, &worker.fields))
        },
        Ok(None) => html! {},
        Err(missing) => html! {
            (Notice::from(AppError::worker_not_found(missing)).render())
            (worker_picker(Menu::ViewWorker.path(), &all, None, "Select Worker to View"))
        },
    };

    Ok(layout(&config, Menu::ViewWorker, "Quick Workers Info", content))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::db::init_test_db;
    use crate::model::transaction::{NewTransaction, TransactionType};
    use crate::model::worker::State;
    use crate::routes;
    use crate::store::workers::tests::{date, sample_worker};
    use crate::store::{transactions, workers};
    use actix_web::web::Bytes;
    use actix_web::{App, test, web::Data};

    macro_rules! page_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($pool.clone()))
                    .app_data(Data::new(Config::default()))
                    .configure(routes::configure_pages),
            )
            .await
        };
    }

    fn text(body: Bytes) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn form_post(uri: &str, payload: String) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload(payload)
    }

    const ALI_FORM: &str = "name=Ali&join_date=2024-01-15&gender=Male&phone=0123&passport_number=A1\
        &passport_expiry=2029-01-14&visa_expiry=2027-01-14&company_name=Maju\
        &address=Jalan+Ampang&state=Kuala+Lumpur&pic_details=Mr+Tan\
        &company_join_date=2024-02-01&base_salary=1500";

    #[actix_web::test]
    async fn add_form_inserts_worker() {
        let pool = init_test_db().await;
        let app = page_app!(pool);

        let req = form_post("/workers/add", ALI_FORM.to_string()).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Worker added successfully!"));
        let all = workers::list_workers(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].fields.name, "Ali");
        assert_eq!(all[0].fields.address, "Jalan Ampang");
        assert_eq!(all[0].fields.state, State::KualaLumpur);
        assert_eq!(all[0].fields.base_salary, 1500.0);
    }

    #[actix_web::test]
    async fn negative_salary_is_rejected_inline() {
        let pool = init_test_db().await;
        let app = page_app!(pool);

        let payload = ALI_FORM.replace("base_salary=1500", "base_salary=-5");
        let req = form_post("/workers/add", payload).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Base salary must be zero or more"));
        assert!(workers::list_workers(&pool).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn pages_warn_when_no_workers_exist() {
        let pool = init_test_db().await;
        let app = page_app!(pool);

        for uri in ["/workers/update", "/workers/delete", "/workers/view", "/transactions", "/report"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let html = text(test::call_and_read_body(&app, req).await);
            assert!(html.contains(super::NO_WORKERS), "{uri} should warn");
        }
    }

    #[actix_web::test]
    async fn update_form_is_prefilled_and_replaces_record() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let app = page_app!(pool);

        let req = test::TestRequest::get()
            .uri(&format!("/workers/update?worker_id={id}"))
            .to_request();
        let html = text(test::call_and_read_body(&app, req).await);
        assert!(html.contains(r#"value="Ali""#));
        assert!(html.contains(r#"value="1500.00""#));

        let payload = ALI_FORM
            .replace("name=Ali", "name=Ali+bin+Abu")
            .replace("state=Kuala+Lumpur", "state=Johor");
        let req = form_post(&format!("/workers/update?worker_id={id}"), payload).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Worker information updated successfully!"));
        let stored = workers::get_worker(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.fields.name, "Ali bin Abu");
        assert_eq!(stored.fields.state, State::Johor);
        assert_eq!(stored.fields.phone, "0123");
    }

    #[actix_web::test]
    async fn update_of_deleted_worker_reports_not_found() {
        let pool = init_test_db().await;
        let app = page_app!(pool);

        let req = form_post("/workers/update?worker_id=77", ALI_FORM.to_string()).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Unable to retrieve worker data for ID 77."));
        assert!(workers::list_workers(&pool).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn delete_confirms_and_removes_ledger() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        transactions::add_transaction(
            &pool,
            &NewTransaction {
                worker_id: id,
                date: date(2026, 10, 1),
                amount: 100.0,
                transaction_type: TransactionType::Advance,
            },
        )
        .await
        .unwrap();
        let app = page_app!(pool);

        let req = test::TestRequest::get().uri("/workers/delete").to_request();
        let html = text(test::call_and_read_body(&app, req).await);
        assert!(html.contains("Are you sure you want to delete Ali?"));

        let req = form_post("/workers/delete", format!("worker_id={id}")).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Ali has been deleted from the database."));
        assert!(workers::get_worker(&pool, id).await.unwrap().is_none());
        assert!(
            transactions::list_transactions(&pool, Some(id), None, None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[actix_web::test]
    async fn view_groups_record_into_sections() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let app = page_app!(pool);

        let req = test::TestRequest::get()
            .uri(&format!("/workers/view?worker_id={id}"))
            .to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        for section in [
            "General Information",
            "Passport Information",
            "Work Related Info",
            "Salary Info",
        ] {
            assert!(html.contains(section));
        }
        assert!(html.contains("RM 1500.00"));
        assert!(html.contains("Kuala Lumpur"));

        let req = test::TestRequest::get()
            .uri("/workers/view?worker_id=999")
            .to_request();
        let html = text(test::call_and_read_body(&app, req).await);
        assert!(html.contains("Unable to retrieve worker data for ID 999."));
    }

    #[actix_web::test]
    async fn salary_input_accepts_any_cent_amount() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Siti", 1550.0)).await.unwrap();
        let app = page_app!(pool);

        let req = test::TestRequest::get()
            .uri(&format!("/workers/update?worker_id={id}"))
            .to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains(r#"value="1550.00""#));
        assert!(html.contains(r#"name="base_salary" min="0" step="0.01""#));
        assert!(!html.contains(r#"step="100""#));
    }

    #[actix_web::test]
    async fn rejected_update_keeps_what_was_typed() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let app = page_app!(pool);

        let payload = ALI_FORM
            .replace("name=Ali", "name=Ali+bin+Abu")
            .replace("base_salary=1500", "base_salary=-5");
        let req = form_post(&format!("/workers/update?worker_id={id}"), payload).to_request();
        let html = text(test::call_and_read_body(&app, req).await);

        assert!(html.contains("Base salary must be zero or more"));
        assert!(html.contains(r#"value="Ali bin Abu""#));
        assert!(html.contains(r#"value="-5.00""#));
        let stored = workers::get_worker(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.fields.name, "Ali");
        assert_eq!(stored.fields.base_salary, 1500.0);
    }

    #[actix_web::test]
    async fn delete_of_missing_worker_reports_not_found() {
        let pool = init_test_db().await;
        let id = workers::add_worker(&pool, &sample_worker("Ali", 1500.0)).await.unwrap();
        let app = page_app!(pool);

        let req = form_post("/workers/delete", "worker_id=404".to_string()).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let html = text(test::read_body(resp).await);

        assert!(html.contains("Unable to retrieve worker data for ID 404."));
        assert!(workers::get_worker(&pool, id).await.unwrap().is_some());
    }
}
