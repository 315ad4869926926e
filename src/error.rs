use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::store::{DuplicateField, StoreError};

/// Error responses of the API. Every variant renders as
/// `{error, message}`, except validation which carries `{error, messages}`.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Validation Error")]
    Validation(Vec<String>),

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "Invalid ID")]
    InvalidId,

    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),

    #[display(fmt = "Duplicate: {:?}", _0)]
    Duplicate(DuplicateField),

    /// The message is the generic text shown to clients; details go to the log.
    #[display(fmt = "Internal Server Error: {}", _0)]
    Internal(&'static str),
}

impl ApiError {
    /// Map a store failure, logging anything that ends up as a 500.
    pub fn from_store(err: StoreError, context: &'static str) -> Self {
        match err {
            StoreError::Duplicate(field) => ApiError::Duplicate(field),
            StoreError::EmployeeNotFound => ApiError::NotFound("Employee not found".to_string()),
            StoreError::Database(e) => {
                error!(error = %e, "{}", context);
                ApiError::Internal(context)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(messages) => json!({
                "error": "Validation Error",
                "messages": messages
            }),
            ApiError::BadRequest(message) => json!({
                "error": "Bad Request",
                "message": message
            }),
            ApiError::InvalidId => json!({
                "error": "Invalid ID",
                "message": "Employee ID must be a valid number"
            }),
            ApiError::NotFound(message) => json!({
                "error": "Not Found",
                "message": message
            }),
            ApiError::Duplicate(DuplicateField::EmployeeCode) => json!({
                "error": "Duplicate Employee",
                "message": "An employee with this Employee ID already exists"
            }),
            ApiError::Duplicate(DuplicateField::Email) => json!({
                "error": "Duplicate Email",
                "message": "An employee with this email already exists"
            }),
            ApiError::Internal(message) => json!({
                "error": "Internal Server Error",
                "message": message
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn validation_lists_every_message() {
        let (status, body) =
            body_of(ApiError::Validation(vec!["a".into(), "b".into()])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["messages"], json!(["a", "b"]));
    }

    #[actix_web::test]
    async fn duplicates_name_the_field() {
        let (status, body) = body_of(ApiError::Duplicate(DuplicateField::Email)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Duplicate Email");

        let (_, body) = body_of(ApiError::Duplicate(DuplicateField::EmployeeCode)).await;
        assert_eq!(body["error"], "Duplicate Employee");
    }

    #[actix_web::test]
    async fn database_errors_are_hidden() {
        let err = ApiError::from_store(
            StoreError::Database(sqlx::Error::PoolTimedOut),
            "Failed to add employee",
        );
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to add employee");
    }

    #[actix_web::test]
    async fn missing_employee_is_not_found() {
        let err = ApiError::from_store(StoreError::EmployeeNotFound, "Failed to mark attendance");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Employee not found");
    }
}
