//! Deadline enforcement for backend calls.
//!
//! # Responsibilities
//! - Wrap every RPC call with a fixed deadline
//! - Cancel the call cleanly when the deadline fires
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the call future cancels it
//! - Expiry surfaces as `DEADLINE_EXCEEDED`, which the translator maps to 504
//! - No retries: a failed call is returned as-is

use std::future::Future;
use std::time::Duration;

use crate::rpc::{RpcError, RpcResult};

/// Run `call` under `deadline`.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> RpcResult<T>
where
    F: Future<Output = RpcResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(RpcError::deadline_exceeded(format!(
            "deadline of {}ms exceeded",
            deadline.as_millis()
        ))),
    }
}
