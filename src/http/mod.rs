//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → decode.rs (strict JSON body, mutations only)
//!     → [api handler issues the RPC]
//!     → translate.rs (RPC status → HTTP status + error code)
//!     → response.rs (JSON body or error envelope)
//!     → Send to client
//! ```

pub mod decode;
pub mod request;
pub mod response;
pub mod server;
pub mod translate;

pub use decode::{decode_json, BodyLimit, DecodeError, DecodeOutcome, StrictJson, MAX_BODY_BYTES};
pub use request::{request_id, request_id_layer, X_REQUEST_ID};
pub use response::{write_empty, write_error, write_success, ApiError, ErrorEnvelope};
pub use server::HttpServer;
pub use translate::{
    app_error_code_for_http, app_error_code_for_rpc, app_error_code_for_rpc_code, http_status_for,
    http_status_for_code, AppErrorCode,
};
