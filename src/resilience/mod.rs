//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! RPC from a handler:
//!     → timeouts.rs (enforce the configured deadline)
//!     → outcome returned to the handler unchanged
//! ```
//!
//! # Design Decisions
//! - Every backend call has a deadline
//! - No retries in this layer; backoff belongs to the RPC client

pub mod timeouts;
