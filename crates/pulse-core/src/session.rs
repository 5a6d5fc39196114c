//! Session Management
//!
//! Explicit authentication context handed to the backend client at
//! construction time. The bearer token lives here, not in global state, and
//! is persisted through a pluggable [`TokenStore`].

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Bearer token returned by the login endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Token persistence (browser local storage, a file, memory)
pub trait TokenStore: Send + Sync {
    /// Load a previously saved token
    fn load(&self) -> Result<Option<AuthToken>>;

    /// Save the token, replacing any previous one
    fn save(&self, token: &AuthToken) -> Result<()>;

    /// Remove the saved token
    fn clear(&self) -> Result<()>;
}

/// In-memory token store (for development/testing)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self.token.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Plain-text token file, used by the CLI
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let raw = raw.trim();
                Ok((!raw.is_empty()).then(|| AuthToken::new(raw)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PulseError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        std::fs::write(&self.path, token.as_str())
            .map_err(|e| PulseError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PulseError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}

/// The signed-in user's session
pub struct Session {
    token: RwLock<Option<AuthToken>>,
    store: Option<Arc<dyn TokenStore>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Session {
    /// Anonymous session with no persistence
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
            store: None,
        }
    }

    /// Session backed by a store, resuming any token already saved there
    pub fn with_store(store: Arc<dyn TokenStore>) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            token: RwLock::new(token),
            store: Some(store),
        })
    }

    /// Begin an authenticated session
    pub fn login(&self, token: AuthToken) -> Result<()> {
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// End the session. The in-memory token is always cleared, even when the
    /// store fails.
    pub fn logout(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
