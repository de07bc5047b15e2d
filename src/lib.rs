//! HTTP/JSON gateway translating REST calls into RPCs against the users and
//! links services.

pub mod api;
pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rpc;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
