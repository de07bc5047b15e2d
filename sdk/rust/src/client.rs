use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub id: String,
    pub username: String,
    pub password: String,
}

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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCreate {
    pub id: String,
    pub title: String,
    pub url: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub user_id: String,
}

/// Error envelope returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum GatewayError {
    /// The gateway answered with a non-success status.
    Api { status: StatusCode, body: ErrorBody },
    Transport(reqwest::Error),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Api { status, body } => {
                write!(f, "gateway returned {}: {}", status, body.code)
            }
            GatewayError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Transport(e)
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn expect_status(resp: Response, expected: StatusCode) -> GatewayResult<Response> {
        let status = resp.status();
        if status == expected {
            return Ok(resp);
        }
        let body = resp.json::<ErrorBody>().await?;
        Err(GatewayError::Api { status, body })
    }

    pub async fn create_user(&self, user: &UserCreate) -> GatewayResult<()> {
        let resp = self.client.post(self.url("/users")).json(user).send().await?;
        Self::expect_status(resp, StatusCode::CREATED).await.map(|_| ())
    }

    pub async fn get_user(&self, id: &str) -> GatewayResult<User> {
        let resp = self.client.get(self.url(&format!("/users/{}", id))).send().await?;
        Ok(Self::expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn update_user(&self, id: &str, user: &UserCreate) -> GatewayResult<()> {
        let resp = self
            .client
            .put(self.url(&format!("/users/{}", id)))
            .json(user)
            .send()
            .await?;
        Self::expect_status(resp, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    pub async fn delete_user(&self, id: &str) -> GatewayResult<()> {
        let resp = self.client.delete(self.url(&format!("/users/{}", id))).send().await?;
        Self::expect_status(resp, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    pub async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let resp = self.client.get(self.url("/users")).send().await?;
        Ok(Self::expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn create_link(&self, link: &LinkCreate) -> GatewayResult<()> {
        let resp = self.client.post(self.url("/links")).json(link).send().await?;
        Self::expect_status(resp, StatusCode::CREATED).await.map(|_| ())
    }

    pub async fn get_link(&self, id: &str) -> GatewayResult<Link> {
        let resp = self.client.get(self.url(&format!("/links/{}", id))).send().await?;
        Ok(Self::expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn update_link(&self, id: &str, link: &LinkCreate) -> GatewayResult<()> {
        let resp = self
            .client
            .put(self.url(&format!("/links/{}", id)))
            .json(link)
            .send()
            .await?;
        Self::expect_status(resp, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    pub async fn delete_link(&self, id: &str) -> GatewayResult<()> {
        let resp = self.client.delete(self.url(&format!("/links/{}", id))).send().await?;
        Self::expect_status(resp, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    pub async fn list_links(&self) -> GatewayResult<Vec<Link>> {
        let resp = self.client.get(self.url("/links")).send().await?;
        Ok(Self::expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn links_by_user(&self, user_id: &str) -> GatewayResult<Vec<Link>> {
        let resp = self
            .client
            .get(self.url(&format!("/links/user/{}", user_id)))
            .send()
            .await?;
        Ok(Self::expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    /// Send an arbitrary body, bypassing JSON encoding.
    pub async fn send_raw(
        &self,
        method: reqwest::Method,
        path: &str,
        content_type: Option<&str>,
        body: impl Into<reqwest::Body>,
    ) -> Result<Response, reqwest::Error> {
        let mut req = self.client.request(method, self.url(path)).body(body);
        if let Some(ct) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, ct);
        }
        req.send().await
    }
}
