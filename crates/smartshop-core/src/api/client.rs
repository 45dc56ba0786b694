//! API client for the SmartShop REST API.
//!
//! This module provides the `ApiClient` struct for the login, register and
//! profile endpoints. Responses are decoded into `ApiEnvelope`s; logical
//! success or failure inside the envelope is left to the repositories.

use std::time::Duration;

use reqwest::{header, Client, Request, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::ApiError;
use crate::auth::{CredentialReader, RequestAuthenticator};
use crate::config::Config;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse};

// ============================================================================
// Endpoints
// ============================================================================

const LOGIN_PATH: &str = "api/auth/login";
const REGISTER_PATH: &str = "api/auth/register";
const CURRENT_USER_PATH: &str = "api/users/me";

/// API client for SmartShop.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    authenticator: RequestAuthenticator,
}

impl ApiClient {
    /// Create a new API client. Every request it sends is passed through a
    /// `RequestAuthenticator` reading from `credentials`.
    pub fn new(config: &Config, credentials: CredentialReader) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: Self::parse_base_url(&config.api_base_url)?,
            authenticator: RequestAuthenticator::new(credentials),
        })
    }

    /// Parse the base URL, making sure it ends in `/` so endpoint paths are
    /// appended instead of replacing the last segment.
    fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
        let raw = raw.trim();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };
        let url = Url::parse(&normalized)
            .map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("'{}' cannot be a base URL", raw)));
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", path, e)))
    }

    // ===== Endpoints =====

    /// `POST /api/auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post(LOGIN_PATH, request).await
    }

    /// `POST /api/auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post(REGISTER_PATH, request).await
    }

    /// `GET /api/users/me` (requires a stored token)
    pub async fn current_user(&self) -> Result<UserResponse, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    // ===== Transport =====

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .client
            .get(self.endpoint(path)?)
            .header(header::ACCEPT, "application/json")
            .build()?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .client
            .post(self.endpoint(path)?)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .build()?;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, mut request: Request) -> Result<T, ApiError> {
        self.authenticator.authenticate(&mut request);

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let response = self.client.execute(request).await?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(%method, %url, error = %e, "Failed to parse JSON response");
            ApiError::Decode(e)
        })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}
