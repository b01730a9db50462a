use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Display, EnumString, EnumIter,
)]
pub enum Gender {
    Male,
    Female,
}

/// Malaysian state the worker is based in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Display, EnumString, EnumIter,
)]
pub enum State {
    #[serde(rename = "Kuala Lumpur")]
    #[sqlx(rename = "Kuala Lumpur")]
    #[strum(serialize = "Kuala Lumpur")]
    KualaLumpur,
    Selangor,
    Penang,
    Johor,
    Other,
}

/// Everything about a worker except the id. Used as-is for both inserts and full-record updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "name": "Ali",
    "join_date": "2024-01-15",
    "gender": "Male",
    "phone": "+60123456789",
    "passport_number": "A12345678",
    "passport_expiry": "2029-01-14",
    "visa_expiry": "2027-01-14",
    "company_name": "Sri Jaya Sdn Bhd",
    "address": "12 Jalan Ampang",
    "state": "Kuala Lumpur",
    "pic_details": "Mr. Tan, 012-3456789",
    "company_join_date": "2024-02-01",
    "base_salary": 1500.0
}))]
pub struct WorkerFields {
    pub name: String,
    #[schema(value_type = String, format = "date")]
    pub join_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub passport_number: String,
    #[schema(value_type = String, format = "date")]
    pub passport_expiry: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub visa_expiry: NaiveDate,
    pub company_name: String,
    pub address: String,
    pub state: State,
    pub pic_details: String,
    #[schema(value_type = String, format = "date")]
    pub company_join_date: NaiveDate,
    #[schema(example = 1500.0)]
    pub base_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Worker {
    #[schema(example = 1)]
    pub id: i64,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: WorkerFields,
}

impl WorkerFields {
    /// A blank record dated `today`, the starting point of the add form.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            join_date: today,
            gender: Gender::Male,
            phone: String::new(),
            passport_number: String::new(),
            passport_expiry: today,
            visa_expiry: today,
            company_name: String::new(),
            address: String::new(),
            state: State::KualaLumpur,
            pic_details: String::new(),
            company_join_date: today,
            base_salary: 0.0,
        }
    }
}
