use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use clientele_core::DomainError;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "not_found")]
    pub error: String,
    #[schema(example = "customer not found with id: 01890a5d-ac96-774b-bcce-b302099a8057")]
    pub message: String,
    /// Field name → message, present only for `validation_error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(fields) => {
            let body = ErrorBody {
                error: "validation_error".to_string(),
                message: fields.to_string(),
                validation_errors: Some(
                    fields
                        .iter()
                        .map(|(field, msg)| (field.to_string(), msg.to_string()))
                        .collect(),
                ),
            };
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        }
        DomainError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Unexpected(detail) => {
            error!(detail = %detail, "request failed unexpectedly");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "an unexpected error occurred",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    let body = ErrorBody {
        error: code.to_string(),
        message: message.into(),
        validation_errors: None,
    };
    (status, axum::Json(body)).into_response()
}
