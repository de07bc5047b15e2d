//! RPC client interface consumed by the HTTP handlers.
//!
//! # Data Flow
//! ```text
//! api handler
//!     → resilience::timeouts (deadline scope)
//!     → UsersClient / LinksClient (backend call)
//!     → Ok(message) | Err(RpcError { status, .. })
//! ```
//!
//! # Design Decisions
//! - Failures carry a typed `RpcStatus` set by the service at the source
//! - Clients are trait objects so handlers can be built with any backend
//! - The message on an `RpcError` is for logs only; it never reaches clients

pub mod status;
pub mod types;

use async_trait::async_trait;

pub use status::{RpcError, RpcResult, RpcStatus};
pub use types::*;

/// Operations of the users service.
#[async_trait]
pub trait UsersClient: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> RpcResult<Empty>;
    async fn get_user(&self, request: GetUserRequest) -> RpcResult<User>;
    async fn update_user(&self, request: UpdateUserRequest) -> RpcResult<Empty>;
    async fn delete_user(&self, request: DeleteUserRequest) -> RpcResult<Empty>;
    async fn list_users(&self, request: Empty) -> RpcResult<ListUsersResponse>;
}

/// Operations of the links service.
#[async_trait]
pub trait LinksClient: Send + Sync {
    async fn create_link(&self, request: CreateLinkRequest) -> RpcResult<Empty>;
    async fn get_link(&self, request: GetLinkRequest) -> RpcResult<Link>;
    async fn update_link(&self, request: UpdateLinkRequest) -> RpcResult<Empty>;
    async fn delete_link(&self, request: DeleteLinkRequest) -> RpcResult<Empty>;
    async fn list_links(&self, request: Empty) -> RpcResult<ListLinksResponse>;
    async fn get_links_by_user_id(
        &self,
        request: GetLinksByUserIdRequest,
    ) -> RpcResult<ListLinksResponse>;
}
