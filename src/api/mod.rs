//! REST resource handlers.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → StrictJson (mutations only; failure answers without an RPC)
//!     → call() (deadline, metrics, logging)
//!     → UsersClient / LinksClient
//!     → write_success / write_empty / ApiError
//! ```
//!
//! # Design Decisions
//! - Each resource is an independent handler object owning its client
//! - Handlers are built at startup and registered on their own route set
//! - The path id is authoritative on `PUT`; a body `id` is ignored

pub mod links;
pub mod users;

use std::future::Future;
use std::time::{Duration, Instant};

use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::rpc::RpcResult;

pub use links::LinksHandler;
pub use users::UsersHandler;

/// Issue one RPC under `deadline` and convert a failure into an [`ApiError`].
async fn call<T, F>(
    rpc: &'static str,
    request_id: &str,
    deadline: Duration,
    fut: F,
) -> Result<T, ApiError>
where
    F: Future<Output = RpcResult<T>>,
{
    let start = Instant::now();
    let result = with_deadline(deadline, fut).await;

    match result {
        Ok(value) => {
            metrics::record_rpc(rpc, "OK", start);
            Ok(value)
        }
        Err(err) => {
            metrics::record_rpc(rpc, err.status.as_str(), start);
            tracing::warn!(
                request_id = %request_id,
                rpc = rpc,
                status = %err.status,
                error = %err.message,
                "RPC failed"
            );
            Err(ApiError::Rpc(err))
        }
    }
}
