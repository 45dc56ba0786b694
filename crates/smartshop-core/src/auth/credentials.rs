use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Keychain service name
const SERVICE_NAME: &str = "smartshop";

/// Keychain account under which the session credential is kept
const SESSION_ACCOUNT: &str = "session";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Failed to write session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode credential: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Access token plus optional refresh token issued at login.
///
/// `saved_at` is informational only; tokens never expire client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            saved_at: Utc::now(),
        }
    }
}

/// Storage for the current session credential.
///
/// `save` overwrites whatever is stored. `get` never fails: a backend that
/// cannot be read reports absence.
pub trait CredentialStore: Send + Sync {
    fn save(&self, credential: Credential) -> Result<(), CredentialError>;

    fn get(&self) -> Option<Credential>;

    /// Current access token, if any
    fn token(&self) -> Option<String> {
        self.get().map(|c| c.access_token)
    }
}

/// Read-only view of a credential store.
///
/// Handed to request-side components so that only the session repository
/// can write the token.
#[derive(Clone)]
pub struct CredentialReader {
    store: Arc<dyn CredentialStore>,
}

impl CredentialReader {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.store.get()
    }
}

impl std::fmt::Debug for CredentialReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialReader")
            .field("has_token", &self.store.token().is_some())
            .finish()
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    current: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, credential: Credential) -> Result<(), CredentialError> {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(credential);
        Ok(())
    }

    fn get(&self) -> Option<Credential> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Store backed by the OS keychain. The credential is kept as JSON in a
/// single entry.
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, CredentialError> {
        Ok(Entry::new(&self.service, SESSION_ACCOUNT)?)
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn save(&self, credential: Credential) -> Result<(), CredentialError> {
        let encoded = serde_json::to_string(&credential)?;
        self.entry()?.set_password(&encoded)?;
        debug!(service = %self.service, "Credential stored in keychain");
        Ok(())
    }

    fn get(&self) -> Option<Credential> {
        let entry = match self.entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to open keychain entry");
                return None;
            }
        };
        match entry.get_password() {
            Ok(encoded) => match serde_json::from_str(&encoded) {
                Ok(credential) => Some(credential),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable keychain credential");
                    None
                }
            },
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read credential from keychain");
                None
            }
        }
    }
}
