// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token middleware for the API routes.
//!
//! When no token is configured, all requests are rejected (fail-closed).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Authentication configuration for the gateway.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token. If `None`, every request is rejected.
    pub bearer_token: Option<String>,
}

impl AuthConfig {
    /// An empty token counts as no token.
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Middleware that validates `Authorization: Bearer <token>`.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected_token) = auth.bearer_token.as_deref() else {
        tracing::error!("gateway has no bearer token configured -- rejecting request");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let presented = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected_token => Ok(next.run(request).await),
        _ => {
            tracing::debug!(path = %request.uri().path(), "request rejected: bad or missing token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_counts_as_unconfigured() {
        assert!(AuthConfig::new(Some(String::new())).bearer_token.is_none());
        assert!(AuthConfig::new(None).bearer_token.is_none());
        assert_eq!(
            AuthConfig::new(Some("secret".into())).bearer_token.as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn auth_config_debug_redacts_token() {
        let config = AuthConfig::new(Some("secret-token".to_string()));
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("secret-token"));
        assert!(debug_output.contains("[redacted]"));
    }
}
