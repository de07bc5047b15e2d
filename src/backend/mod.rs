//! In-process implementations of the users and links services.
//!
//! # Data Flow
//! ```text
//! UsersClient / LinksClient call
//!     → id validation (INVALID_ARGUMENT on malformed ids)
//!     → DashMap store (ALREADY_EXISTS / NOT_FOUND set here)
//!     → message with RFC 3339 timestamps
//! ```
//!
//! # Design Decisions
//! - Statuses are chosen where the failure happens, never inferred later
//! - Stores are `Arc<DashMap>` so services are cheap to clone and share
//! - Listings are ordered by creation time, then id

pub mod links;
pub mod users;

use chrono::{DateTime, SecondsFormat, Utc};

pub use links::LinkService;
pub use users::UserService;

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
