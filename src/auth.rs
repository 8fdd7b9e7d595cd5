//! Authentication gate for the mutating API operations
//!
//! Token verification is delegated to the external identity provider; the
//! authorization decision is a pluggable predicate over the verified claims
//! so a future role system can replace the allowlist without touching the
//! handlers. Both are injected through `AppState`, keeping the gate testable
//! without a live network.
//!
//! Handlers opt in by taking an `AdminUser` argument (custom extractor
//! pattern rather than a middleware layer).

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{error::ApiError, AppState};

/// Claims extracted from a verified bearer token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    #[serde(default)]
    pub user_id: String,
}

/// Token verification failure
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The provider judged the token invalid or expired
    #[error("Invalid token: {0}")]
    Rejected(String),

    /// The provider could not be reached
    #[error("Identity provider unreachable: {0}")]
    Transport(String),
}

/// Verifies bearer tokens against the identity provider
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<TokenClaims, VerifyError>;
}

/// Authorization predicate over verified claims
pub trait AdminPolicy: Send + Sync {
    fn authorize(&self, claims: &TokenClaims) -> bool;
}

/// Allowlist-of-one: the single configured admin email may mutate records
pub struct AllowlistPolicy {
    admin_email: String,
}

impl AllowlistPolicy {
    pub fn new(admin_email: String) -> Self {
        Self { admin_email }
    }
}

impl AdminPolicy for AllowlistPolicy {
    fn authorize(&self, claims: &TokenClaims) -> bool {
        claims.email == self.admin_email
    }
}

/// HTTP-backed verifier calling the identity provider's verification endpoint
///
/// Authenticates to the provider with a service-account key loaded from a
/// credentials file at construction time.
pub struct HttpTokenVerifier {
    http: reqwest::Client,
    verify_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct ServiceAccount {
    api_key: String,
}

impl HttpTokenVerifier {
    pub fn new(
        http: reqwest::Client,
        verify_url: String,
        credentials_path: &std::path::Path,
    ) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(credentials_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read service account file {}: {}",
                credentials_path.display(),
                e
            )
        })?;
        let account: ServiceAccount = serde_json::from_str(&raw)?;

        Ok(Self {
            http,
            verify_url,
            service_key: account.api_key,
        })
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify_token(&self, token: &str) -> Result<TokenClaims, VerifyError> {
        let response = self
            .http
            .post(&self.verify_url)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| VerifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VerifyError::Rejected(detail));
        }

        response
            .json::<TokenClaims>()
            .await
            .map_err(|e| VerifyError::Rejected(e.to_string()))
    }
}

/// Extractor asserting the caller is the configured admin
///
/// Rejections: 401 when the bearer token is missing or fails verification,
/// 403 when the token is valid but the claims fail the admin policy.
pub struct AdminUser(pub TokenClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

        let claims = state
            .verifier
            .verify_token(token)
            .await
            .map_err(|err| ApiError::Unauthorized(err.to_string()))?;

        if !state.admin_policy.authorize(&claims) {
            tracing::warn!(email = %claims.email, "Rejected non-admin mutation attempt");
            return Err(ApiError::Forbidden("Admin access required".into()));
        }

        Ok(AdminUser(claims))
    }
}
