pub mod transactions;
pub mod workers;

use sqlx::Sqlite;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::sqlite::SqliteArguments;

/// A bindable value for queries whose WHERE clause is assembled at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    I64(i64),
    Text(String),
}

/// SQL fragment plus the values for its placeholders, in order.
#[derive(Debug, Default)]
pub struct Conditions {
    clauses: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl Conditions {
    pub fn push(&mut self, clause: &'static str, values: impl IntoIterator<Item = SqlValue>) {
        self.clauses.push(clause);
        self.values.extend(values);
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn bind_all<'q, O>(
        &self,
        mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for value in &self.values {
            query = match value {
                SqlValue::I64(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }
        query
    }

    pub fn bind_scalar<'q, O>(
        &self,
        mut query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        for value in &self.values {
            query = match value {
                SqlValue::I64(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }
        query
    }
}

/// `strftime('%Y')` / `strftime('%m')` text for a calendar month.
pub fn year_month_text(year: i32, month: u32) -> [SqlValue; 2] {
    [
        SqlValue::Text(format!("{year:04}")),
        SqlValue::Text(format!("{month:02}")),
    ]
}
