//! Core library for the SmartShop account client.
//!
//! - `api`: REST client for the SmartShop API
//! - `auth`: credential storage and the bearer-token request authenticator
//! - `models`: wire types (envelope, login/register/user payloads)
//! - `repository`: session and user repositories that normalize outcomes
//! - `state`: observable form state for login and registration
//! - `config`: persisted client configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod repository;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{
    Credential, CredentialError, CredentialReader, CredentialStore, FileCredentialStore,
    KeyringCredentialStore, MemoryCredentialStore, RequestAuthenticator,
};
pub use config::{Config, CredentialBackend};
pub use repository::{AuthRepository, SessionError, SessionResult, UserRepository};
pub use state::{AuthFlow, AuthState};
