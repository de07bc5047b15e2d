//! Strict JSON request body decoding.
//!
//! # Responsibilities
//! - Require an `application/json` content type
//! - Read the body through a hard size cap
//! - Parse exactly one JSON object, rejecting unknown and repeated keys
//! - Classify every failure into a stable (status, message) pair
//!
//! # Design Decisions
//! - First violated check wins: content type, size, parse, trailing data
//! - The body is moved into the decoder and dropped on every exit path
//! - Target shapes opt into key rejection with `#[serde(deny_unknown_fields)]`

use axum::{
    body::Body,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::error::Category;
use thiserror::Error;

use crate::http::response::ApiError;

/// Default request body cap in bytes.
pub const MAX_BODY_BYTES: usize = 64_000;

const JSON_CONTENT_TYPE: &[u8] = b"application/json";

/// Body size cap for [`StrictJson`], installed as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        Self(MAX_BODY_BYTES)
    }
}

/// Why a request body was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("content-type is not application/json")]
    UnsupportedMediaType,

    /// Carries the text of the underlying limit error.
    #[error("{0}")]
    TooLarge(String),

    #[error("malformed json at position {offset}")]
    Syntax { offset: usize },

    #[error("body must not be empty")]
    Empty,

    #[error("malformed json")]
    Truncated,

    #[error("invalid value {field:?} at position {offset}")]
    InvalidValue { field: String, offset: usize },

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("duplicate field {0:?}")]
    DuplicateField(String),

    #[error("body must contain only one JSON object")]
    TrailingData,

    #[error("failed to decode json: {0}")]
    Other(String),
}

impl DecodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            DecodeError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            DecodeError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            DecodeError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DecodeError::Syntax { .. }
            | DecodeError::Empty
            | DecodeError::Truncated
            | DecodeError::InvalidValue { .. }
            | DecodeError::UnknownField(_)
            | DecodeError::DuplicateField(_)
            | DecodeError::TrailingData => StatusCode::BAD_REQUEST,
        }
    }
}

/// Result of decoding one request body.
pub type DecodeOutcome<T> = Result<T, DecodeError>;

/// Validate headers, read the body under `limit` and parse it as `T`.
pub async fn decode_json<T>(headers: &HeaderMap, body: Body, limit: usize) -> DecodeOutcome<T>
where
    T: DeserializeOwned,
{
    if !has_json_content_type(headers) {
        return Err(DecodeError::UnsupportedMediaType);
    }

    let bytes = read_body(body, limit).await?;
    parse_strict(&bytes)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(JSON_CONTENT_TYPE))
}

/// Collect the body, failing once more than `limit` bytes arrive.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, DecodeError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(DecodeError::TooLarge(err.to_string()))
        }
        Err(err) => Err(DecodeError::Other(err.to_string())),
    }
}

/// Parse exactly one JSON object from `bytes`.
pub fn parse_strict<T>(bytes: &[u8]) -> DecodeOutcome<T>
where
    T: DeserializeOwned,
{
    // Derived structs also accept sequences, so the top level is checked here.
    match first_significant_byte(bytes) {
        None | Some(b'{') => {}
        Some(_) => return Err(reject_non_object(bytes)),
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let field = field_name(err.path());
        classify(bytes, field, err.into_inner())
    })?;

    if de.end().is_err() {
        return Err(DecodeError::TrailingData);
    }

    Ok(value)
}

fn first_significant_byte(bytes: &[u8]) -> Option<u8> {
    bytes.iter().copied().find(|b| !is_whitespace(*b))
}

/// A well-formed top-level value that is not an object is a type error at its
/// end offset; anything else keeps its syntax classification.
fn reject_non_object(bytes: &[u8]) -> DecodeError {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<IgnoredAny>();
    match values.next() {
        Some(Ok(_)) => DecodeError::InvalidValue {
            field: String::new(),
            offset: values.byte_offset(),
        },
        Some(Err(err)) => classify(bytes, String::new(), err),
        None => DecodeError::Empty,
    }
}

/// Dotted path of the failing field, empty at the root.
fn field_name(path: &serde_path_to_error::Path) -> String {
    match path.iter().next() {
        None => String::new(),
        Some(_) => path.to_string(),
    }
}

fn classify(bytes: &[u8], field: String, err: serde_json::Error) -> DecodeError {
    let offset = byte_offset(bytes, err.line(), err.column());

    match err.classify() {
        Category::Eof if is_blank(bytes) => DecodeError::Empty,
        Category::Eof => DecodeError::Truncated,
        Category::Syntax => DecodeError::Syntax { offset },
        Category::Data => {
            let message = bare_message(&err);
            if let Some(name) = unknown_field_name(&message) {
                DecodeError::UnknownField(name)
            } else if let Some(name) = duplicate_field_name(&message) {
                DecodeError::DuplicateField(name)
            } else {
                DecodeError::InvalidValue { field, offset }
            }
        }
        Category::Io => DecodeError::Other(err.to_string()),
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| is_whitespace(*b))
}

/// serde reports line/column; clients get a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line - 1)
        .map(|l| l.len() + 1)
        .sum();

    line_start + column
}

/// The error text without serde_json's position suffix.
fn bare_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match full.strip_suffix(&suffix) {
        Some(bare) => bare.to_string(),
        None => full,
    }
}

// serde only exposes the rejected key through the message text. The key may
// itself contain backticks, so it ends at the last backtick before the
// list of accepted fields.
fn unknown_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest
        .rfind("`, expected")
        .or_else(|| rest.rfind("`, there are no fields"))?;
    Some(rest[..end].to_string())
}

fn duplicate_field_name(message: &str) -> Option<String> {
    let name = message
        .strip_prefix("duplicate field `")?
        .strip_suffix('`')?;
    Some(name.to_string())
}

/// Axum extractor running [`decode_json`] on the request body.
///
/// The cap comes from a [`BodyLimit`] request extension, falling back to
/// [`MAX_BODY_BYTES`].
#[derive(Debug, Clone)]
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let limit = req
            .extensions()
            .get::<BodyLimit>()
            .copied()
            .unwrap_or_default();
        let (parts, body) = req.into_parts();

        match decode_json(&parts.headers, body, limit.0).await {
            Ok(value) => Ok(StrictJson(value)),
            Err(err) => Err(ApiError::Decode(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    struct Shape {
        id: String,
        tags: Vec<String>,
    }

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    async fn decode(body: &'static str) -> DecodeOutcome<Shape> {
        decode_json(&json_headers(), Body::from(body), MAX_BODY_BYTES).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let shape = decode(r#"{"id":"1","tags":["a"]}"#).await.unwrap();
        assert_eq!(shape.id, "1");
        assert_eq!(shape.tags, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_accepted() {
        let shape = decode(" \n{\"id\":\"1\"}\n ").await.unwrap();
        assert_eq!(shape.id, "1");
    }

    #[tokio::test]
    async fn test_content_type_checked_first() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let err = decode_json::<Shape>(&headers, Body::from("not even json"), MAX_BODY_BYTES)
            .await
            .unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedMediaType);
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.to_string(), "content-type is not application/json");

        let err = decode_json::<Shape>(&HeaderMap::new(), Body::from("{}"), MAX_BODY_BYTES)
            .await
            .unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedMediaType);
    }

    #[tokio::test]
    async fn test_content_type_with_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        let shape: Shape = decode_json(&headers, Body::from(r#"{"id":"x"}"#), MAX_BODY_BYTES)
            .await
            .unwrap();
        assert_eq!(shape.id, "x");
    }

    #[tokio::test]
    async fn test_body_over_cap() {
        let body = format!(r#"{{"id":"{}"}}"#, "a".repeat(70_000));
        let err = decode_json::<Shape>(&json_headers(), Body::from(body), MAX_BODY_BYTES)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(matches!(err, DecodeError::TooLarge(ref msg) if !msg.is_empty()));
    }

    #[tokio::test]
    async fn test_syntax_error_reports_offset() {
        let err = decode(r#"{"id":}"#).await.unwrap_err();
        assert_eq!(err, DecodeError::Syntax { offset: 7 });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "malformed json at position 7");
    }

    #[tokio::test]
    async fn test_syntax_offset_spans_lines() {
        let err = decode("{\n\"id\":}").await.unwrap_err();
        assert_eq!(err, DecodeError::Syntax { offset: 8 });
    }

    #[tokio::test]
    async fn test_empty_body() {
        for body in ["", "   \n"] {
            let err = decode(body).await.unwrap_err();
            assert_eq!(err, DecodeError::Empty);
            assert_eq!(err.to_string(), "body must not be empty");
        }
    }

    #[tokio::test]
    async fn test_truncated_body() {
        let err = decode(r#"{"id":"1""#).await.unwrap_err();
        assert_eq!(err, DecodeError::Truncated);
        assert_eq!(err.to_string(), "malformed json");
    }

    #[tokio::test]
    async fn test_wrong_type_names_field() {
        let err = decode(r#"{"id":42}"#).await.unwrap_err();
        match &err {
            DecodeError::InvalidValue { field, offset } => {
                assert_eq!(field, "id");
                assert!(*offset > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("invalid value \"id\" at position "));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_field() {
        let err = decode(r#"{"id":"1","unknownField":true}"#).await.unwrap_err();
        assert_eq!(err, DecodeError::UnknownField("unknownField".into()));
        assert_eq!(err.to_string(), "unknown field \"unknownField\"");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_second_object_rejected() {
        let err = decode(r#"{"id":"1"}{"id":"2"}"#).await.unwrap_err();
        assert_eq!(err, DecodeError::TrailingData);
        assert_eq!(err.to_string(), "body must contain only one JSON object");
    }

    #[tokio::test]
    async fn test_top_level_must_be_object() {
        for (body, offset) in [
            ("[]", 2),
            (r#"["6f1c2b1e-3c1a-4d0e-9b59-2b8f6f0f4a11","alice","pw"]"#, 53),
            (r#""alice""#, 7),
            (" 42", 3),
        ] {
            let err = decode(body).await.unwrap_err();
            assert_eq!(
                err,
                DecodeError::InvalidValue {
                    field: String::new(),
                    offset
                },
                "{body}"
            );
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.to_string(), format!("invalid value \"\" at position {offset}"));
        }
    }

    #[tokio::test]
    async fn test_non_object_keeps_syntax_errors() {
        assert_eq!(decode("[1,").await.unwrap_err(), DecodeError::Truncated);
        assert!(matches!(
            decode("nope").await.unwrap_err(),
            DecodeError::Syntax { .. }
        ));
    }

    #[test]
    fn test_root_type_error_has_empty_field() {
        match parse_strict::<u32>(b"{}").unwrap_err() {
            DecodeError::InvalidValue { field, .. } => assert_eq!(field, ""),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_field() {
        let err = decode(r#"{"id":"1","id":"2"}"#).await.unwrap_err();
        assert_eq!(err, DecodeError::DuplicateField("id".into()));
        assert_eq!(err.to_string(), "duplicate field \"id\"");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_field_with_backtick() {
        let err = decode(r#"{"a`b":1}"#).await.unwrap_err();
        assert_eq!(err, DecodeError::UnknownField("a`b".into()));
    }

    #[test]
    fn test_other_maps_to_500() {
        let err = DecodeError::Other("boom".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "failed to decode json: boom");
    }

    #[test]
    fn test_unknown_field_name_parsing() {
        assert_eq!(
            unknown_field_name("unknown field `x`, expected `id` at line 1 column 5"),
            Some("x".to_string())
        );
        assert_eq!(
            unknown_field_name("unknown field `a`, expected`, expected one of `id`, `tags`"),
            Some("a`, expected".to_string())
        );
        assert_eq!(
            unknown_field_name("unknown field `x`, there are no fields"),
            Some("x".to_string())
        );
        assert_eq!(unknown_field_name("invalid type: integer `1`"), None);
        assert_eq!(duplicate_field_name("duplicate field `id`"), Some("id".to_string()));
    }
}
