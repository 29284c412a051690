//! API client for the Melodica authentication endpoints.
//!
//! This module provides the `ApiClient` struct wrapping the two network
//! operations the auth layer needs: `POST /register` and `POST /login`.
//! Both return [`AccessData`] on success; on a non-success status the
//! raw server-provided reason string is surfaced in the error so the
//! caller can map it to a user-facing message.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::models::{AccessData, LoginRequest, RegisterRequest};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the Melodica backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Register a new account. Pure network call, no session side effects.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AccessData> {
        debug!(email = %request.email, "registering new account");
        self.post_auth("/register", request, ApiError::Registration)
            .await
            .map_err(Into::into)
    }

    /// Log in with email and password. Pure network call; persistence and
    /// expiry scheduling are handled by `AuthService::login`.
    pub async fn login(&self, request: &LoginRequest) -> Result<AccessData> {
        debug!(email = %request.email, "logging in");
        self.post_auth("/login", request, ApiError::Authentication)
            .await
            .map_err(Into::into)
    }

    async fn post_auth<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        rejection: impl FnOnce(String) -> ApiError,
    ) -> Result<AccessData, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(extract_reason(&body)));
        }

        let data: AccessData = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(data)
    }
}

/// Pull the rejection reason out of an error body.
///
/// The backend reports failures as a bare JSON-encoded string
/// (e.g. `"Email already exists"`); fall back to the raw text if the
/// body isn't valid JSON.
fn extract_reason(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}
