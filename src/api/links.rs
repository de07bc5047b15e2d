//! `/links` endpoints.

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
    self, CreateLinkRequest, DeleteLinkRequest, Empty, GetLinkRequest, GetLinksByUserIdRequest,
    LinksClient, ListLinksResponse, UpdateLinkRequest,
};

/// Link representation on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<rpc::Link> for Link {
    fn from(link: rpc::Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            images: link.images,
            tags: link.tags,
            user_id: link.user_id,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Body of `POST /links` and `PUT /links/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkCreate {
    pub id: String,
    pub title: String,
    pub url: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub user_id: String,
}

/// Handler for the links resource.
pub struct LinksHandler {
    client: Arc<dyn LinksClient>,
    deadline: Duration,
}

impl LinksHandler {
    pub fn new(client: Arc<dyn LinksClient>, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Routes served by this handler.
    pub fn routes(self) -> Router {
        Router::new()
            .route("/links", get(list_links).post(create_link))
            .route(
                "/links/{id}",
                get(get_link).put(update_link).delete(delete_link),
            )
            .route("/links/user/{user_id}", get(links_by_user))
            .with_state(Arc::new(self))
    }
}

fn link_list(resp: ListLinksResponse) -> Vec<Link> {
    resp.links.into_iter().map(Link::from).collect()
}

async fn list_links(
    State(handler): State<Arc<LinksHandler>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let resp = call(
        "ListLinks",
        request_id(&headers),
        handler.deadline,
        handler.client.list_links(Empty),
    )
    .await?;

    Ok(write_success(StatusCode::OK, &link_list(resp)))
}

async fn create_link(
    State(handler): State<Arc<LinksHandler>>,
    headers: HeaderMap,
    StrictJson(body): StrictJson<LinkCreate>,
) -> Result<Response, ApiError> {
    call(
        "CreateLink",
        request_id(&headers),
        handler.deadline,
        handler.client.create_link(CreateLinkRequest {
            id: body.id,
            title: body.title,
            url: body.url,
            images: body.images,
            tags: body.tags,
            user_id: body.user_id,
        }),
    )
    .await?;

    Ok(write_empty(StatusCode::CREATED))
}

async fn get_link(
    State(handler): State<Arc<LinksHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let link = call(
        "GetLink",
        request_id(&headers),
        handler.deadline,
        handler.client.get_link(GetLinkRequest { id }),
    )
    .await?;

    Ok(write_success(StatusCode::OK, &Link::from(link)))
}

async fn update_link(
    State(handler): State<Arc<LinksHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    StrictJson(body): StrictJson<LinkCreate>,
) -> Result<Response, ApiError> {
    call(
        "UpdateLink",
        request_id(&headers),
        handler.deadline,
        handler.client.update_link(UpdateLinkRequest {
            id,
            title: body.title,
            url: body.url,
            images: body.images,
            tags: body.tags,
            user_id: body.user_id,
        }),
    )
    .await?;

    Ok(write_empty(StatusCode::NO_CONTENT))
}

async fn delete_link(
    State(handler): State<Arc<LinksHandler>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    call(
        "DeleteLink",
        request_id(&headers),
        handler.deadline,
        handler.client.delete_link(DeleteLinkRequest { id }),
    )
    .await?;

    Ok(write_empty(StatusCode::NO_CONTENT))
}

async fn links_by_user(
    State(handler): State<Arc<LinksHandler>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let resp = call(
        "GetLinksByUserId",
        request_id(&headers),
        handler.deadline,
        handler
            .client
            .get_links_by_user_id(GetLinksByUserIdRequest { user_id }),
    )
    .await?;

    Ok(write_success(StatusCode::OK, &link_list(resp)))
}
