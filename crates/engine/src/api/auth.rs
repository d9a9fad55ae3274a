//! Caller identity for HTTP routes.
//!
//! The upstream session layer puts the authenticated player id in the
//! `X-User-Id` header.

use axum::{extract::FromRequestParts, http::request::Parts};
use menagerie_domain::PlayerId;

use super::http::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated player in handlers.
///
/// A missing, non-UTF-8 or blank header rejects with `not_authenticated`.
#[derive(Debug, Clone)]
pub struct Caller(pub PlayerId);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(ApiError::not_authenticated)?;

        PlayerId::new(user_id)
            .map(Caller)
            .map_err(|_| ApiError::not_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn protected_handler(Caller(player): Caller) -> String {
        format!("player:{}", player)
    }

    #[tokio::test]
    async fn test_caller_extractor_with_header() {
        let app = Router::new().route("/", get(protected_handler));

        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", " 1234567890 ")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"player:1234567890");
    }

    #[tokio::test]
    async fn test_caller_extractor_without_header() {
        let app = Router::new().route("/", get(protected_handler));

        let request = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_caller_extractor_with_blank_header() {
        let app = Router::new().route("/", get(protected_handler));

        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", "   ")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
