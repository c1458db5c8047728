// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inventory::InventoryError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_code: &'static str,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub error_code: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let code = err.error_code();
        let status = match &err {
            InventoryError::NotFound(_)
            | InventoryError::ElementNotFound(_)
            | InventoryError::ParentNotFound(_)
            | InventoryError::UnknownInterfaceType(_) => StatusCode::NOT_FOUND,
            InventoryError::DuplicateName(_)
            | InventoryError::DuplicateInterface(_)
            | InventoryError::DuplicateTag(_)
            | InventoryError::ElementInUse(_)
            | InventoryError::ParentCycle(_) => StatusCode::CONFLICT,
            InventoryError::InvalidName(_) | InventoryError::InvalidInterfaceData { .. } => {
                StatusCode::BAD_REQUEST
            }
            InventoryError::CorruptedInterfaceData { .. }
            | InventoryError::Codec(_)
            | InventoryError::TransactionFailure(_)
            | InventoryError::Internal(_) => {
                // Details stay in the log
                tracing::error!(error = %err, error_code = code, "Inventory operation failed");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, "Internal server error");
            }
        };
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.error_code.to_string(),
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.error_code, "bad_request");
    }

    #[test]
    fn inventory_errors_map_to_statuses() {
        let cases = [
            (InventoryError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (InventoryError::ElementNotFound("x".into()), StatusCode::NOT_FOUND),
            (InventoryError::UnknownInterfaceType("x".into()), StatusCode::NOT_FOUND),
            (InventoryError::DuplicateTag("x".into()), StatusCode::CONFLICT),
            (InventoryError::ElementInUse("x".into()), StatusCode::CONFLICT),
            (InventoryError::ParentCycle("x".into()), StatusCode::CONFLICT),
            (InventoryError::InvalidName("x".into()), StatusCode::BAD_REQUEST),
            (
                InventoryError::InvalidInterfaceData {
                    field: "port".into(),
                    reason: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                InventoryError::TransactionFailure(StoreError::NotFound("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn server_errors_hide_details() {
        let err = ApiError::from(InventoryError::CorruptedInterfaceData {
            interface: "ssh".into(),
            reason: "aead::Error".into(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code, "corrupted_interface_data");
        assert_eq!(err.message, "Internal server error");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::from(InventoryError::DuplicateName("r1".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(
            body,
            r#"{"error":"Element name already in use: r1","error_code":"duplicate_name"}"#
        );
    }
}
