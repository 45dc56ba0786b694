use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::{SessionError, SessionResult};
use crate::api::ApiClient;
use crate::auth::{Credential, CredentialStore};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Login and registration. The only writer of the credential store.
#[derive(Clone)]
pub struct AuthRepository {
    api: ApiClient,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthRepository {
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Log in and store the issued token.
    ///
    /// The envelope counts as a success only when it is flagged successful
    /// and carries an access token; otherwise the store is left untouched.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> SessionResult<LoginResponse> {
        let response = self.api.login(request).await.map_err(|e| {
            warn!(error = %e, "Login request failed");
            SessionError::from(e)
        })?;

        let token = response
            .data()
            .filter(|_| response.is_success)
            .and_then(|data| data.access_token.clone().map(|t| (t, data.refresh_token.clone())));

        match token {
            Some((access_token, refresh_token)) => {
                if let Err(e) = self
                    .credentials
                    .save(Credential::new(access_token, refresh_token))
                {
                    warn!(error = %e, "Failed to persist session token");
                }
                info!("Login successful");
                Ok(response)
            }
            None => {
                let message = response.failure_message(LOGIN_FAILED);
                warn!(%message, "Login rejected");
                Err(SessionError::Business(message))
            }
        }
    }

    /// Register a new account. Registration never logs the user in.
    #[instrument(skip_all, fields(email = %request.email, username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> SessionResult<RegisterResponse> {
        let response = self.api.register(request).await.map_err(|e| {
            warn!(error = %e, "Register request failed");
            SessionError::from(e)
        })?;

        // A successful envelope without a payload is still accepted here
        if response.is_success {
            info!("Registration successful");
            Ok(response)
        } else {
            let message = response.failure_message(REGISTRATION_FAILED);
            warn!(%message, "Registration rejected");
            Err(SessionError::Business(message))
        }
    }
}
