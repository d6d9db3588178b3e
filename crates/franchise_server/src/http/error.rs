//! Client-facing error envelope.
//!
//! Body shape: `{"error": {"code": "...", "message": "...", "details": [...]}}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use franchise_core::{FieldViolation, FranchiseServiceError, ValidationError};
use log::error;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    ValidationFailed,
    MalformedBody,
    PayloadTooLarge,
    UnsupportedMediaType,
    NotFound,
    StoreUnavailable,
}

impl ApiErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            Self::ValidationFailed | Self::MalformedBody => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Vec<FieldViolation>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: value.to_string(),
            details: value.violations().to_vec(),
        }
    }
}

/// Body limit and content-type rejections keep their own status; every
/// other decode failure is a malformed body.
impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        let code = match value.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiErrorCode::PayloadTooLarge,
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ApiErrorCode::UnsupportedMediaType,
            _ => ApiErrorCode::MalformedBody,
        };
        Self::new(code, value.body_text())
    }
}

impl From<FranchiseServiceError> for ApiError {
    fn from(value: FranchiseServiceError) -> Self {
        match value {
            FranchiseServiceError::Validation(err) => err.into(),
            err if err.is_not_found() => Self::new(ApiErrorCode::NotFound, err.to_string()),
            err => {
                error!("event=store_failure module=http status=error error={err}");
                Self::new(
                    ApiErrorCode::StoreUnavailable,
                    "franchise store is unavailable",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Envelope {
            error: ApiError,
        }

        (self.code.status(), Json(Envelope { error: self })).into_response()
    }
}
