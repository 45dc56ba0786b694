//! Observable form state for login and registration.
//!
//! `AuthFlow` drives the `AuthRepository` and publishes an `AuthState` for
//! each form over a `tokio::sync::watch` channel. Front ends render the
//! state, show the error message once, then call `reset`.

use tokio::sync::watch;
use tracing::debug;

use crate::models::{LoginRequest, RegisterRequest};
use crate::repository::AuthRepository;

/// Shown when the login form is submitted with a blank field
pub const LOGIN_FIELDS_REQUIRED: &str = "Please enter email and password";

/// Shown when the register form is submitted with a blank field
pub const REGISTER_FIELDS_REQUIRED: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl AuthState {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthState::Error(message) => Some(message),
            _ => None,
        }
    }
}

pub struct AuthFlow {
    repository: AuthRepository,
    login_state: watch::Sender<AuthState>,
    register_state: watch::Sender<AuthState>,
}

impl AuthFlow {
    pub fn new(repository: AuthRepository) -> Self {
        let (login_state, _) = watch::channel(AuthState::Idle);
        let (register_state, _) = watch::channel(AuthState::Idle);
        Self {
            repository,
            login_state,
            register_state,
        }
    }

    pub fn subscribe_login(&self) -> watch::Receiver<AuthState> {
        self.login_state.subscribe()
    }

    pub fn subscribe_register(&self) -> watch::Receiver<AuthState> {
        self.register_state.subscribe()
    }

    pub fn login_state(&self) -> AuthState {
        self.login_state.borrow().clone()
    }

    pub fn register_state(&self) -> AuthState {
        self.register_state.borrow().clone()
    }

    /// Submit the login form. Returns the final state.
    ///
    /// Fields are only trimmed to detect blanks; the request carries them as
    /// typed.
    pub async fn login(&self, email: &str, password: &str) -> AuthState {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Self::publish(
                &self.login_state,
                AuthState::Error(LOGIN_FIELDS_REQUIRED.to_string()),
            );
        }

        Self::publish(&self.login_state, AuthState::Loading);
        let request = LoginRequest::new(email, password);
        let state = match self.repository.login(&request).await {
            Ok(_) => AuthState::Success,
            Err(e) => AuthState::Error(e.to_string()),
        };
        Self::publish(&self.login_state, state)
    }

    /// Submit the registration form. Returns the final state.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        gender: bool,
    ) -> AuthState {
        if [username, email, password].iter().any(|f| f.trim().is_empty()) {
            return Self::publish(
                &self.register_state,
                AuthState::Error(REGISTER_FIELDS_REQUIRED.to_string()),
            );
        }

        Self::publish(&self.register_state, AuthState::Loading);
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
            gender,
        };
        let state = match self.repository.register(&request).await {
            Ok(_) => AuthState::Success,
            Err(e) => AuthState::Error(e.to_string()),
        };
        Self::publish(&self.register_state, state)
    }

    /// Put both forms back to `Idle`
    pub fn reset(&self) {
        Self::publish(&self.login_state, AuthState::Idle);
        Self::publish(&self.register_state, AuthState::Idle);
    }

    fn publish(sender: &watch::Sender<AuthState>, state: AuthState) -> AuthState {
        debug!(?state, "Auth state changed");
        sender.send_replace(state.clone());
        state
    }
}
