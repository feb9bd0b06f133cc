//! Authentication middleware and extractors.
//!
//! Provides the extractor that gates authenticated routes on bearer-token
//! verification. Which routes are gated is declared once, in the route
//! table: product reads are public, everything that writes (and the
//! supplier/importer listings) takes `RequireAuth`.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::Principal;
use crate::state::AppState;

/// Extractor that requires a verified bearer token.
///
/// Reads the `Authorization` header, submits the token to the identity
/// provider, and yields the verified [`Principal`]. Any failure along the
/// way becomes a 401 with a fixed body; the verifier's reason is logged,
/// never returned.
///
/// There is deliberately no ownership check: any valid principal may invoke
/// any gated route.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(principal): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", principal.email)
/// }
/// ```
pub struct RequireAuth(pub Principal);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized("missing authorization header"))?;

        let token =
            bearer_token(header).ok_or(AppError::Unauthorized("malformed authorization header"))?;

        let email = state
            .identity()
            .verify_token(token)
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "token verification failed");
                AppError::Unauthorized("invalid token")
            })?;

        Ok(Self(Principal { email }))
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// Returns `None` for a missing or empty scheme/token rather than guessing.
fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_valid() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_scheme() {
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
    }

    #[test]
    fn test_bearer_token_empty_token() {
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer    "), None);
    }

    #[test]
    fn test_bearer_token_scheme_is_case_sensitive() {
        assert_eq!(bearer_token("bearer abc"), None);
    }
}
