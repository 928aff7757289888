//! `AuthUser` extractor — pulls the JWT from the Authorization header or
//! session cookie, validates it against the account, and injects the
//! request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bizhub_core::error::AppError;
use bizhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts, &state.config.auth.cookie_name))
            .ok_or_else(|| AppError::unauthorized("Missing authentication token"))?;

        let claims = state.jwt_decoder.decode_token(&token)?;
        let ctx = RequestContext::new(claims.user_id(), claims.email);

        // A deactivated account's unexpired token must stop working.
        state.auth_service.current_user(&ctx).await?;

        Ok(AuthUser(ctx))
    }
}

/// Extract a Bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Extract the session token from the Cookie header.
fn cookie_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let header = parts.headers.get("cookie")?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_headers(&[("authorization", "Bearer abc123")]);
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc123"));

        let parts = parts_with_headers(&[("authorization", "Basic abc123")]);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_cookie_token_extraction() {
        let parts = parts_with_headers(&[("cookie", "theme=dark; token=abc123; lang=en")]);
        assert_eq!(cookie_token(&parts, "token").as_deref(), Some("abc123"));
        assert_eq!(cookie_token(&parts, "session"), None);
    }
}
