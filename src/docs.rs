use crate::api::workers::PeriodQuery;
use crate::model::transaction::{Transaction, TransactionType};
use crate::model::worker::{Gender, State, Worker, WorkerFields};
use crate::report::{MonthlyReport, Period, Summary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Worker Ledger API",
        version = "0.1.0",
        description = r#"
## Worker Ledger

Read-only JSON view of the worker records and the salary ledger kept by the
operator pages.

- **Workers**: profiles with passport, visa and employment details
- **Transactions**: advances and payouts logged against a worker
- **Reports**: monthly totals and the salary left after advances and payouts

All writes happen through the HTML forms; this API never changes data.
"#,
    ),
    paths(
        crate::api::workers::list_workers,
        crate::api::workers::get_worker,
        crate::api::workers::list_worker_transactions,
        crate::api::workers::worker_report,

        crate::api::summary::get_summary
    ),
    components(
        schemas(
            Gender,
            State,
            WorkerFields,
            Worker,
            TransactionType,
            Transaction,
            Period,
            PeriodQuery,
            MonthlyReport,
            Summary
        )
    ),
    tags(
        (name = "Worker", description = "Worker records"),
        (name = "Transaction", description = "Advance and payout ledger"),
        (name = "Report", description = "Derived totals"),
    )
)]
pub struct ApiDoc;
