//! Translation of domain errors into HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::BankError;

impl BankError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            BankError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BankError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage failures are logged in full but never leak to clients
        let message = match &self {
            BankError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                "Internal storage error".to_string()
            }
            other => {
                warn!("Request rejected ({}): {}", status, other);
                other.to_string()
            }
        };

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BankError::CustomerNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BankError::AccountNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BankError::RecipientNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BankError::transaction_invalid("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BankError::AssociationExists("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BankError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BankError::Storage(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_kind_and_message() {
        let response = BankError::AccountNotFound(42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body.error, "account_not_found");
        assert_eq!(body.message, "Account not found: 42");
    }

    #[tokio::test]
    async fn test_storage_details_are_hidden() {
        let response = BankError::Storage(anyhow::anyhow!("database is locked")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, "storage_error");
        assert!(!body.message.contains("locked"));
    }
}
