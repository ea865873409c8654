//! Username/password store backed by a JSON file.
//!
//! **Not a security design.** Passwords are stored and compared in
//! plaintext, there is no hashing, lockout or rate limiting. The file is a
//! single JSON object mapping username to password, read whole and
//! rewritten whole on every registration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CredentialError;

/// Default credential file name, resolved against the data directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "users.json";

/// In-memory copy of the credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Load the store from `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CredentialError> {
        let path = path.into();
        let users = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| CredentialError::File {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CredentialError::File {
                    path,
                    message: e.to_string(),
                })
            }
        };
        debug!(path = %path.display(), "credential store loaded");
        Ok(Self { path, users })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a user and persist the whole map.
    ///
    /// An existing username is overwritten with the new password.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), CredentialError> {
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::MissingFields);
        }
        let mut users = self.users.clone();
        users.insert(username.to_string(), password.to_string());
        self.write(&users)?;
        self.users = users;
        info!(username, "user registered");
        Ok(())
    }

    /// Check a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        match self.users.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(CredentialError::Mismatch),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn write(&self, users: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        let to_err = |message: String| CredentialError::File {
            path: self.path.clone(),
            message,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| to_err(e.to_string()))?;
        }
        let content = serde_json::to_string(users).map_err(|e| to_err(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| to_err(e.to_string()))?;
        Ok(())
    }
}
