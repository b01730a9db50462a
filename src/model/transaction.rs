use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Display, EnumString, EnumIter,
)]
pub enum TransactionType {
    Advance,
    Payout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "worker_id": 1,
    "date": "2026-10-05",
    "amount": 200.0,
    "transaction_type": "Advance"
}))]
pub struct Transaction {
    pub id: i64,
    pub worker_id: i64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub amount: f64,
    pub transaction_type: TransactionType,
}

/// A ledger entry as submitted by the transaction form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    pub worker_id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub transaction_type: TransactionType,
}
