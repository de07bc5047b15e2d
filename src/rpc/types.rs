//! Request and response messages exchanged with the backend services.

/// Empty reply for calls that only signal success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Empty;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub id: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteUserRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateLinkRequest {
    pub id: String,
    pub title: String,
    pub url: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLinkRequest {
    pub id: String,
    pub title: String,
    pub url: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLinkRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteLinkRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLinksByUserIdRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLinksResponse {
    pub links: Vec<Link>,
}
