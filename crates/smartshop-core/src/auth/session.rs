use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::credentials::{Credential, CredentialError, CredentialStore};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Credential store persisted as a JSON file.
///
/// The file is read once at open; afterwards the in-memory copy is
/// authoritative and every save rewrites the file.
pub struct FileCredentialStore {
    dir: PathBuf,
    current: RwLock<Option<Credential>>,
}

impl FileCredentialStore {
    /// Open the store in `dir`, loading a previously saved session if one
    /// exists. An unreadable session file is ignored rather than fatal.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let current = match Self::load(&dir) {
            Ok(current) => current,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session file");
                None
            }
        };
        debug!(?dir, has_session = current.is_some(), "Session store opened");
        Self {
            dir,
            current: RwLock::new(current),
        }
    }

    fn load(dir: &Path) -> Result<Option<Credential>> {
        let path = dir.join(SESSION_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let credential: Credential =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(credential))
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn write(&self, credential: &Credential) -> Result<(), CredentialError> {
        std::fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(self.session_path(), contents)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, credential: Credential) -> Result<(), CredentialError> {
        let written = self.write(&credential);
        // Keep the token usable for this process even if the disk write failed
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(credential);
        written
    }

    fn get(&self) -> Option<Credential> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
