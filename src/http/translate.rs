//! RPC status → HTTP status / application error code translation.
//!
//! # Design Decisions
//! - All functions are total: anything unmapped resolves to 500 and
//!   `internal_server_error`
//! - Raw integer entry points exist for codes that arrive outside the enum

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::rpc::RpcStatus;

/// Client-facing error taxonomy carried in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppErrorCode {
    BadRequest,
    Conflict,
    NotFound,
    InternalServerError,
}

impl AppErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            AppErrorCode::BadRequest => "bad_request",
            AppErrorCode::Conflict => "conflict",
            AppErrorCode::NotFound => "not_found",
            AppErrorCode::InternalServerError => "internal_server_error",
        }
    }
}

/// HTTP status for an RPC outcome.
pub fn http_status_for(status: RpcStatus) -> StatusCode {
    match status {
        RpcStatus::Ok => StatusCode::OK,
        RpcStatus::Cancelled => StatusCode::REQUEST_TIMEOUT,
        RpcStatus::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        RpcStatus::InvalidArgument => StatusCode::BAD_REQUEST,
        RpcStatus::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        RpcStatus::NotFound => StatusCode::NOT_FOUND,
        RpcStatus::AlreadyExists => StatusCode::CONFLICT,
        RpcStatus::PermissionDenied => StatusCode::FORBIDDEN,
        RpcStatus::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        RpcStatus::FailedPrecondition => StatusCode::BAD_REQUEST,
        RpcStatus::Aborted => StatusCode::CONFLICT,
        RpcStatus::OutOfRange => StatusCode::BAD_REQUEST,
        RpcStatus::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        RpcStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        RpcStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        RpcStatus::DataLoss => StatusCode::INTERNAL_SERVER_ERROR,
        RpcStatus::Unauthenticated => StatusCode::UNAUTHORIZED,
    }
}

/// Same as [`http_status_for`] for a raw wire code.
pub fn http_status_for_code(code: i32) -> StatusCode {
    RpcStatus::from_code(code)
        .map(http_status_for)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Application error code for an RPC outcome.
pub fn app_error_code_for_rpc(status: RpcStatus) -> AppErrorCode {
    match status {
        RpcStatus::Internal | RpcStatus::Unknown | RpcStatus::DataLoss => {
            AppErrorCode::InternalServerError
        }
        RpcStatus::NotFound => AppErrorCode::NotFound,
        RpcStatus::InvalidArgument | RpcStatus::FailedPrecondition | RpcStatus::OutOfRange => {
            AppErrorCode::BadRequest
        }
        RpcStatus::Aborted | RpcStatus::AlreadyExists => AppErrorCode::Conflict,
        _ => AppErrorCode::InternalServerError,
    }
}

/// Same as [`app_error_code_for_rpc`] for a raw wire code.
pub fn app_error_code_for_rpc_code(code: i32) -> AppErrorCode {
    RpcStatus::from_code(code)
        .map(app_error_code_for_rpc)
        .unwrap_or(AppErrorCode::InternalServerError)
}

/// Application error code for a failure raised before any RPC was made.
pub fn app_error_code_for_http(status: StatusCode) -> AppErrorCode {
    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::PAYLOAD_TOO_LARGE
        | StatusCode::UNSUPPORTED_MEDIA_TYPE => AppErrorCode::BadRequest,
        StatusCode::CONFLICT => AppErrorCode::Conflict,
        _ => AppErrorCode::InternalServerError,
    }
}
