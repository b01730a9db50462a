use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;
use tracing::error;

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    InvalidInput(String),

    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "Database operation failed");
        AppError::Database(e)
    }
}

impl AppError {
    pub fn worker_not_found(worker_id: i64) -> Self {
        AppError::NotFound(format!("Unable to retrieve worker data for ID {worker_id}."))
    }

    /// Text safe to show to the operator; database details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Something went wrong, check the application log".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.public_message()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let err = AppError::worker_not_found(7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Unable to retrieve worker data for ID 7.");
    }

    #[test]
    fn database_details_are_hidden() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("no rows"));
    }
}
