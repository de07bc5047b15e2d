//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use link_gateway::backend::{LinkService, UserService};
use link_gateway::config::GatewayConfig;
use link_gateway::rpc::{
    CreateUserRequest, DeleteUserRequest, Empty, GetUserRequest, LinksClient, ListUsersResponse,
    RpcError, RpcResult, RpcStatus, UpdateUserRequest, User, UsersClient,
};
use link_gateway::{HttpServer, Shutdown};
use sdk_rust::GatewayClient;
use tokio::net::TcpListener;

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: GatewayClient,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway forwarding to the given clients.
pub async fn start_gateway(
    config: GatewayConfig,
    users: Arc<dyn UsersClient>,
    links: Arc<dyn LinksClient>,
) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, users, links);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway {
        addr,
        client: GatewayClient::new(&format!("http://{}", addr)),
        shutdown,
    }
}

/// Plain HTTP client that ignores proxy settings.
#[allow(dead_code)]
pub fn http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Start a gateway over fresh in-process services.
pub async fn start_in_process() -> TestGateway {
    start_gateway(
        GatewayConfig::default(),
        Arc::new(UserService::new()),
        Arc::new(LinkService::new()),
    )
    .await
}

/// Users client that fails every call with a fixed status and counts calls.
#[derive(Clone)]
pub struct FailingUsers {
    pub status: RpcStatus,
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingUsers {
    pub fn new(status: RpcStatus) -> Self {
        Self {
            status,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> RpcResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RpcError::new(self.status, "scripted failure with backend detail"))
    }
}

#[async_trait]
impl UsersClient for FailingUsers {
    async fn create_user(&self, _request: CreateUserRequest) -> RpcResult<Empty> {
        self.fail()
    }

    async fn get_user(&self, _request: GetUserRequest) -> RpcResult<User> {
        self.fail()
    }

    async fn update_user(&self, _request: UpdateUserRequest) -> RpcResult<Empty> {
        self.fail()
    }

    async fn delete_user(&self, _request: DeleteUserRequest) -> RpcResult<Empty> {
        self.fail()
    }

    async fn list_users(&self, _request: Empty) -> RpcResult<ListUsersResponse> {
        self.fail()
    }
}

/// Users client that never answers within any reasonable deadline.
#[allow(dead_code)]
pub struct StalledUsers;

#[async_trait]
impl UsersClient for StalledUsers {
    async fn create_user(&self, _request: CreateUserRequest) -> RpcResult<Empty> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Empty)
    }

    async fn get_user(&self, _request: GetUserRequest) -> RpcResult<User> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(User::default())
    }

    async fn update_user(&self, _request: UpdateUserRequest) -> RpcResult<Empty> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Empty)
    }

    async fn delete_user(&self, _request: DeleteUserRequest) -> RpcResult<Empty> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Empty)
    }

    async fn list_users(&self, _request: Empty) -> RpcResult<ListUsersResponse> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ListUsersResponse::default())
    }
}
