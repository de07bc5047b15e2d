//! Users service over an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::rfc3339;
use crate::rpc::{
    CreateUserRequest, DeleteUserRequest, Empty, GetUserRequest, ListUsersResponse, RpcError,
    RpcResult, UpdateUserRequest, User, UsersClient,
};

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    fn to_message(&self) -> User {
        User {
            id: self.id.to_string(),
            username: self.username.clone(),
            password: self.password.clone(),
            created_at: rfc3339(self.created_at),
            updated_at: rfc3339(self.updated_at),
        }
    }
}

/// Users keyed by UUID.
#[derive(Debug, Clone, Default)]
pub struct UserService {
    users: Arc<DashMap<Uuid, UserRecord>>,
}

impl UserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn parse_id(id: &str) -> RpcResult<Uuid> {
    Uuid::parse_str(id).map_err(|e| RpcError::invalid_argument(e.to_string()))
}

#[async_trait]
impl UsersClient for UserService {
    async fn create_user(&self, request: CreateUserRequest) -> RpcResult<Empty> {
        let id = parse_id(&request.id)?;

        match self.users.entry(id) {
            Entry::Occupied(_) => Err(RpcError::already_exists(format!("user {id} already exists"))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                slot.insert(UserRecord {
                    id,
                    username: request.username,
                    password: request.password,
                    created_at: now,
                    updated_at: now,
                });
                tracing::debug!(user_id = %id, "User created");
                Ok(Empty)
            }
        }
    }

    async fn get_user(&self, request: GetUserRequest) -> RpcResult<User> {
        let id = parse_id(&request.id)?;

        self.users
            .get(&id)
            .map(|r| r.value().to_message())
            .ok_or_else(|| RpcError::not_found(format!("user {id} not found")))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> RpcResult<Empty> {
        let id = parse_id(&request.id)?;

        let mut record = self
            .users
            .get_mut(&id)
            .ok_or_else(|| RpcError::not_found(format!("user {id} not found")))?;
        record.username = request.username;
        record.password = request.password;
        record.updated_at = Utc::now();
        Ok(Empty)
    }

    async fn delete_user(&self, request: DeleteUserRequest) -> RpcResult<Empty> {
        let id = parse_id(&request.id)?;

        self.users
            .remove(&id)
            .map(|_| Empty)
            .ok_or_else(|| RpcError::not_found(format!("user {id} not found")))
    }

    async fn list_users(&self, _request: Empty) -> RpcResult<ListUsersResponse> {
        let mut records: Vec<UserRecord> = self.users.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(ListUsersResponse {
            users: records.iter().map(UserRecord::to_message).collect(),
        })
    }
}
