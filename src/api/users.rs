//! `/users` endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::call;
use crate::http::decode::StrictJson;
use crate::http::request::request_id;
use crate::http::response::{write_empty, write_success, ApiError};
use crate::rpc::{
    self, CreateUserRequest, DeleteUserRequest, Empty, GetUserRequest, UpdateUserRequest,
    UsersClient,
};

/// User representation on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<rpc::User> for User {
    fn from(user: rpc::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password: user.password,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserCreate {
    pub id: String,
    pub username: String,
    pub password: String,
}

/// Handler for the users resource.
pub struct UsersHandler {
    client: Arc<dyn UsersClient>,
    deadline: Duration,
}

impl UsersHandler {
    pub fn new(client: Arc<dyn UsersClient>, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Routes served by this handler.
    pub fn routes(self) -> Router {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .route(
                "/users/{id}",
                get(get_user).put(update_user).delete(delete_user),
            )
            .with_state(Arc::new(self))
    }
}

async fn list_users(
    State(handler): State<Arc<UsersHandler>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let resp = call(
        "ListUsers",
        request_id(&headers),
        handler.deadline,
        handler.client.list_users(Empty),
    )
    .await?;

    let users: Vec<User> = resp.users.into_iter().map(User::from).collect();
    Ok(write_success(StatusCode::OK, &users))
}

async fn create_user(
    State(handler): State<Arc<UsersHandler>>,
    headers: HeaderMap,
    StrictJson(body): StrictJson<UserCreate>,
) -> Result<Response, ApiError> {
    call(
        "CreateUser",
        request_id(&headers),
        handler.deadline,
        handler.client.create_user(CreateUserRequest {
            id: body.id,
            username: body.username,
            password: body.password,
        }),
    )
    .await?;

    Ok(write_empty(StatusCode::CREATED))
}

async fn get_user(
    State(handler): State<Arc<UsersHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let user = call(
        "GetUser",
        request_id(&headers),
        handler.deadline,
        handler.client.get_user(GetUserRequest { id }),
    )
    .await?;

    Ok(write_success(StatusCode::OK, &User::from(user)))
}

async fn update_user(
    State(handler): State<Arc<UsersHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    StrictJson(body): StrictJson<UserCreate>,
) -> Result<Response, ApiError> {
    call(
        "UpdateUser",
        request_id(&headers),
        handler.deadline,
        handler.client.update_user(UpdateUserRequest {
            id,
            username: body.username,
            password: body.password,
        }),
    )
    .await?;

    Ok(write_empty(StatusCode::NO_CONTENT))
}

async fn delete_user(
    State(handler): State<Arc<UsersHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    call(
        "DeleteUser",
        request_id(&headers),
        handler.deadline,
        handler.client.delete_user(DeleteUserRequest { id }),
    )
    .await?;

    Ok(write_empty(StatusCode::NO_CONTENT))
}
