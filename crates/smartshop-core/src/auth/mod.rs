//! Authentication module for session tokens.
//!
//! This module provides:
//! - `CredentialStore`: the single place holding the current session token,
//!   with in-memory, file and OS keychain backends
//! - `CredentialReader`: read-only handle given to request-side code
//! - `RequestAuthenticator`: attaches the stored token as a bearer credential
//!
//! Tokens carry no expiry; a stored token is used until the next login
//! replaces it.

pub mod authenticator;
pub mod credentials;
pub mod session;

pub use authenticator::RequestAuthenticator;
pub use credentials::{
    Credential, CredentialError, CredentialReader, CredentialStore, KeyringCredentialStore,
    MemoryCredentialStore,
};
pub use session::FileCredentialStore;
