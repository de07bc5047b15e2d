//! Response writing.
//!
//! # Responsibilities
//! - Serialize success payloads as JSON
//! - Build the error envelope for RPC and decode failures
//! - Degrade to a bare 500 when serialization itself fails
//!
//! # Design Decisions
//! - RPC errors never expose their message; decode errors always do
//! - `message` is always present in the envelope, `null` when withheld

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::decode::DecodeError;
use crate::http::translate::{
    app_error_code_for_http, app_error_code_for_rpc, http_status_for, AppErrorCode,
};
use crate::rpc::RpcError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: AppErrorCode,
    pub message: Option<String>,
}

/// A request that failed either before or during the RPC call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rpc(err) => http_status_for(err.status),
            ApiError::Decode(err) => err.status(),
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ApiError::Rpc(err) => ErrorEnvelope {
                code: app_error_code_for_rpc(err.status),
                message: None,
            },
            ApiError::Decode(err) => ErrorEnvelope {
                code: app_error_code_for_http(err.status()),
                message: Some(err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        write_error(&self)
    }
}

/// Serialize `payload` and send it with `status`.
///
/// Falls back to an empty 500 when `payload` cannot be serialized.
pub fn write_success<T>(status: StatusCode, payload: &T) -> Response
where
    T: Serialize + ?Sized,
{
    let data = match serde_json::to_vec(payload) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        data,
    )
        .into_response()
}

/// Status line only, no body.
pub fn write_empty(status: StatusCode) -> Response {
    status.into_response()
}

/// Send the error envelope for `error`.
pub fn write_error(error: &ApiError) -> Response {
    write_success(error.status(), &error.envelope())
}
