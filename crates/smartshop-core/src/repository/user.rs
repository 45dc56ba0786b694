use tracing::{debug, warn};

use super::{SessionError, SessionResult};
use crate::api::ApiClient;
use crate::models::UserResponse;

const PROFILE_FAILED: &str = "Failed to fetch user profile";

/// Profile lookups for the logged-in user.
#[derive(Clone)]
pub struct UserRepository {
    api: ApiClient,
}

impl UserRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn current_user(&self) -> SessionResult<UserResponse> {
        let response = self.api.current_user().await.map_err(|e| {
            warn!(error = %e, "Profile request failed");
            SessionError::from(e)
        })?;

        if response.is_success {
            debug!("Profile fetched");
            Ok(response)
        } else {
            Err(SessionError::Business(response.failure_message(PROFILE_FAILED)))
        }
    }
}
