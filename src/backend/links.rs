//! Links service over an in-memory store.
//!
//! Link ids are 24-character hex object ids, stored and returned in lowercase.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::rfc3339;
use crate::rpc::{
    CreateLinkRequest, DeleteLinkRequest, Empty, GetLinkRequest, GetLinksByUserIdRequest, Link,
    LinksClient, ListLinksResponse, RpcError, RpcResult, UpdateLinkRequest,
};

const OBJECT_ID_LEN: usize = 24;

#[derive(Debug, Clone)]
struct LinkRecord {
    id: String,
    title: String,
    url: String,
    images: Vec<String>,
    tags: Vec<String>,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LinkRecord {
    fn to_message(&self) -> Link {
        Link {
            id: self.id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            images: self.images.clone(),
            tags: self.tags.clone(),
            user_id: self.user_id.clone(),
            created_at: rfc3339(self.created_at),
            updated_at: rfc3339(self.updated_at),
        }
    }
}

/// Links keyed by object id.
#[derive(Debug, Clone, Default)]
pub struct LinkService {
    links: Arc<DashMap<String, LinkRecord>>,
}

impl LinkService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn snapshot<F>(&self, keep: F) -> ListLinksResponse
    where
        F: Fn(&LinkRecord) -> bool,
    {
        let mut records: Vec<LinkRecord> = self
            .links
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        ListLinksResponse {
            links: records.iter().map(LinkRecord::to_message).collect(),
        }
    }
}

fn parse_object_id(id: &str) -> RpcResult<String> {
    if id.len() != OBJECT_ID_LEN || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RpcError::invalid_argument(format!(
            "{id:?} is not a valid object id"
        )));
    }
    Ok(id.to_ascii_lowercase())
}

#[async_trait]
impl LinksClient for LinkService {
    async fn create_link(&self, request: CreateLinkRequest) -> RpcResult<Empty> {
        let id = parse_object_id(&request.id)?;

        match self.links.entry(id) {
            Entry::Occupied(slot) => Err(RpcError::already_exists(format!(
                "link {} already exists",
                slot.key()
            ))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let record = LinkRecord {
                    id: slot.key().clone(),
                    title: request.title,
                    url: request.url,
                    images: request.images,
                    tags: request.tags,
                    user_id: request.user_id,
                    created_at: now,
                    updated_at: now,
                };
                tracing::debug!(link_id = %record.id, "Link created");
                slot.insert(record);
                Ok(Empty)
            }
        }
    }

    async fn get_link(&self, request: GetLinkRequest) -> RpcResult<Link> {
        let id = parse_object_id(&request.id)?;

        self.links
            .get(&id)
            .map(|r| r.value().to_message())
            .ok_or_else(|| RpcError::not_found(format!("link {id} not found")))
    }

    async fn update_link(&self, request: UpdateLinkRequest) -> RpcResult<Empty> {
        let id = parse_object_id(&request.id)?;

        let mut record = self
            .links
            .get_mut(&id)
            .ok_or_else(|| RpcError::not_found(format!("link {id} not found")))?;
        record.title = request.title;
        record.url = request.url;
        record.images = request.images;
        record.tags = request.tags;
        record.user_id = request.user_id;
        record.updated_at = Utc::now();
        Ok(Empty)
    }

    async fn delete_link(&self, request: DeleteLinkRequest) -> RpcResult<Empty> {
        let id = parse_object_id(&request.id)?;

        self.links
            .remove(&id)
            .map(|_| Empty)
            .ok_or_else(|| RpcError::not_found(format!("link {id} not found")))
    }

    async fn list_links(&self, _request: Empty) -> RpcResult<ListLinksResponse> {
        Ok(self.snapshot(|_| true))
    }

    async fn get_links_by_user_id(
        &self,
        request: GetLinksByUserIdRequest,
    ) -> RpcResult<ListLinksResponse> {
        Ok(self.snapshot(|record| record.user_id == request.user_id))
    }
}
