//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and middleware produce:
//!     → logging.rs (structured log events, request id on every line)
//!     → metrics.rs (request and RPC counters, latency histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
