//! Canonical RPC status codes and the error type carried by failed calls.

use thiserror::Error;

/// Canonical RPC outcome code.
///
/// The discriminants are the canonical wire values (0..=16). Anything outside
/// that range only exists as a raw `i32` and is handled by the `*_code`
/// translator entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RpcStatus {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl RpcStatus {
    /// Every status in canonical order.
    pub const ALL: [RpcStatus; 17] = [
        RpcStatus::Ok,
        RpcStatus::Cancelled,
        RpcStatus::Unknown,
        RpcStatus::InvalidArgument,
        RpcStatus::DeadlineExceeded,
        RpcStatus::NotFound,
        RpcStatus::AlreadyExists,
        RpcStatus::PermissionDenied,
        RpcStatus::ResourceExhausted,
        RpcStatus::FailedPrecondition,
        RpcStatus::Aborted,
        RpcStatus::OutOfRange,
        RpcStatus::Unimplemented,
        RpcStatus::Internal,
        RpcStatus::Unavailable,
        RpcStatus::DataLoss,
        RpcStatus::Unauthenticated,
    ];

    /// Look up a status by its canonical wire value.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Canonical wire value.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// `SCREAMING_SNAKE_CASE` name, used as a metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            RpcStatus::Ok => "OK",
            RpcStatus::Cancelled => "CANCELLED",
            RpcStatus::Unknown => "UNKNOWN",
            RpcStatus::InvalidArgument => "INVALID_ARGUMENT",
            RpcStatus::DeadlineExceeded => "DEADLINE_EXCEEDED",
            RpcStatus::NotFound => "NOT_FOUND",
            RpcStatus::AlreadyExists => "ALREADY_EXISTS",
            RpcStatus::PermissionDenied => "PERMISSION_DENIED",
            RpcStatus::ResourceExhausted => "RESOURCE_EXHAUSTED",
            RpcStatus::FailedPrecondition => "FAILED_PRECONDITION",
            RpcStatus::Aborted => "ABORTED",
            RpcStatus::OutOfRange => "OUT_OF_RANGE",
            RpcStatus::Unimplemented => "UNIMPLEMENTED",
            RpcStatus::Internal => "INTERNAL",
            RpcStatus::Unavailable => "UNAVAILABLE",
            RpcStatus::DataLoss => "DATA_LOSS",
            RpcStatus::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl std::fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed RPC call.
///
/// The status is set by the service at the point of failure; callers branch
/// on it, never on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rpc error: status = {status}, message = {message}")]
pub struct RpcError {
    pub status: RpcStatus,
    pub message: String,
}

impl RpcError {
    pub fn new(status: RpcStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::NotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::AlreadyExists, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::Internal, message)
    }

    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::DeadlineExceeded, message)
    }
}

/// Result type for RPC calls.
pub type RpcResult<T> = Result<T, RpcError>;
