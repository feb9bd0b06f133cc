//! Identity toolkit client for bearer-token verification.
//!
//! The API never inspects tokens itself; it submits them to the external
//! identity provider's `accounts:lookup` endpoint and consumes exactly one
//! claim from the answer: the verified email address.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use ihub_core::Email;

use crate::config::IdentityConfig;

/// Errors that can occur when verifying a token.
///
/// Callers collapse all of these into an unauthorized response; the
/// distinctions exist for logging only.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the token.
    #[error("provider rejected token: status {0}")]
    Rejected(u16),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Token verified but carries no usable email claim.
    #[error("no principal in provider response")]
    NoPrincipal,
}

/// Response shape of the identity toolkit `accounts:lookup` endpoint.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

/// One account record in a lookup response.
#[derive(Debug, Deserialize)]
struct LookupUser {
    email: Option<String>,
}

/// Client for the identity toolkit API.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    lookup_url: String,
}

impl IdentityClient {
    /// Create a new identity toolkit client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let lookup_url = format!(
            "{}/accounts:lookup?key={}",
            config.base_url.trim_end_matches('/'),
            config.api_key.expose_secret()
        );

        Ok(Self { client, lookup_url })
    }

    /// Verify a bearer token and return the principal's email.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the provider is unreachable, rejects the
    /// token, or answers without an email claim.
    pub async fn verify_token(&self, token: &str) -> Result<Email, IdentityError> {
        let response = self
            .client
            .post(&self.lookup_url)
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected(status.as_u16()));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        principal_email(lookup)
    }
}

/// Extract the single consumed claim from a lookup response.
fn principal_email(lookup: LookupResponse) -> Result<Email, IdentityError> {
    let email = lookup
        .users
        .into_iter()
        .next()
        .and_then(|u| u.email)
        .ok_or(IdentityError::NoPrincipal)?;

    Email::parse(&email).map_err(|e| IdentityError::Parse(e.to_string()))
}
