use crate::{
    api::{summary, workers as worker_api},
    error::AppError,
    pages::{self, PageError, home, report, transactions, workers},
};
use actix_web::web;

/// Operator pages. Unparsable form or query input comes back as an HTML error page.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        PageError::from(AppError::InvalidInput(format!("Invalid form input: {err}"))).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        PageError::from(AppError::InvalidInput(format!("Invalid selection: {err}"))).into()
    }))
    .service(web::resource(pages::Menu::Home.path()).route(web::get().to(home::index)))
    .service(
        web::scope("/workers")
            // /workers/add
            .service(
                web::resource("/add")
                    .route(web::get().to(workers::add_form))
                    .route(web::post().to(workers::add_submit)),
            )
            // /workers/update?worker_id=
            .service(
                web::resource("/update")
                    .route(web::get().to(workers::update_form))
                    .route(web::post().to(workers::update_submit)),
            )
            // /workers/delete
            .service(
                web::resource("/delete")
                    .route(web::get().to(workers::delete_form))
                    .route(web::post().to(workers::delete_submit)),
            )
            // /workers/view?worker_id=
            .service(web::resource("/view").route(web::get().to(workers::view))),
    )
    .service(
        web::resource("/transactions")
            .route(web::get().to(transactions::transaction_form_page))
            .route(web::post().to(transactions::transaction_submit)),
    )
    .service(web::resource("/report").route(web::get().to(report::report_page)));
}

/// Read-only JSON API under `prefix`.
pub fn configure_api(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.service(
        web::scope(prefix)
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(format!("Invalid query: {err}")).into()
            }))
            .service(
                web::scope("/workers")
                    // /workers
                    .service(web::resource("").route(web::get().to(worker_api::list_workers)))
                    // /workers/{id}
                    .service(web::resource("/{id}").route(web::get().to(worker_api::get_worker)))
                    // /workers/{id}/transactions
                    .service(
                        web::resource("/{id}/transactions")
                            .route(web::get().to(worker_api::list_worker_transactions)),
                    )
                    // /workers/{id}/report
                    .service(
                        web::resource("/{id}/report").route(web::get().to(worker_api::worker_report)),
                    ),
            )
            .service(web::resource("/summary").route(web::get().to(summary::get_summary))),
    );
}
