//! Persistence of the cart identity across sessions.
//!
//! The store holds a single string under [`CART_IDENTITY_KEY`]. Access is
//! synchronous; [`crate::CartSync`] serializes every call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use shopfront_core::CartIdentity;
use thiserror::Error;

/// Well-known key the cart identity is stored under.
pub const CART_IDENTITY_KEY: &str = "shopfront.cart_id";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to access identity file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("identity file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value persistence for the cart identity.
pub trait IdentityStore: Send + Sync {
    /// Returns the persisted identity, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the backing storage cannot be read.
    fn get(&self) -> Result<Option<CartIdentity>, IdentityError>;

    /// Persists `identity`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the backing storage cannot be written.
    fn set(&self, identity: &CartIdentity) -> Result<(), IdentityError>;

    /// Removes the persisted identity. Clearing an empty store is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the backing storage cannot be written.
    fn clear(&self) -> Result<(), IdentityError>;
}

/// In-process store; lives exactly as long as the value.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    value: Mutex<Option<CartIdentity>>,
}

impl MemoryIdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `identity`, as if a previous session had
    /// persisted it.
    #[must_use]
    pub fn with_identity(identity: CartIdentity) -> Self {
        Self {
            value: Mutex::new(Some(identity)),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self) -> Result<Option<CartIdentity>, IdentityError> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, identity: &CartIdentity) -> Result<(), IdentityError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), IdentityError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Store backed by a JSON object file (`{"shopfront.cart_id": "gid://..."}`).
///
/// Other keys in the file are preserved. A missing file reads as empty.
/// Writes go to a sibling temp file that is then renamed over the original.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> IdentityError {
        IdentityError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, IdentityError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| IdentityError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Reads the entries for a rewrite. A corrupt file cannot hold a usable
    /// identity, so it reads as empty and the flag says it must be replaced.
    fn read_entries_or_reset(&self) -> Result<(BTreeMap<String, String>, bool), IdentityError> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(e @ IdentityError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "replacing corrupt cart identity file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let body = serde_json::to_string_pretty(entries).map_err(|e| IdentityError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl IdentityStore for FileIdentityStore {
    fn get(&self) -> Result<Option<CartIdentity>, IdentityError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(CART_IDENTITY_KEY)
            .filter(|v| !v.trim().is_empty())
            .map(|v| CartIdentity::new(v.clone())))
    }

    fn set(&self, identity: &CartIdentity) -> Result<(), IdentityError> {
        let (mut entries, _) = self.read_entries_or_reset()?;
        entries.insert(CART_IDENTITY_KEY.to_owned(), identity.as_str().to_owned());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), IdentityError> {
        let (mut entries, corrupt) = self.read_entries_or_reset()?;
        let removed = entries.remove(CART_IDENTITY_KEY).is_some();
        if !removed && !corrupt {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}
