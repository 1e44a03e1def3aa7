//! Session persistence and client wiring for the CLI.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use vantage_core::{AccessToken, ApiUrl, TokenStore};
use vantage_http::{Dispatcher, InvalidationHook, SessionController};

use crate::output;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk session format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
}

/// File-backed token store under the platform data directory.
///
/// The token survives across CLI invocations until logout or forced
/// invalidation. This file is the only persisted state the CLI keeps.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Open the store at the well-known session path.
    pub fn open() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "vantage").context("Could not determine config directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Open a store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<AccessToken> {
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredSession = match serde_json::from_str(&json) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session file");
                return None;
            }
        };
        Some(AccessToken::new(stored.access_token))
    }

    fn set(&self, token: AccessToken) {
        let stored = StoredSession {
            access_token: token.as_str().to_string(),
        };

        let json = match serde_json::to_string_pretty(&stored) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize session");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &json) {
            warn!(error = %e, path = %self.path.display(), "failed to write session file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        if let Ok(metadata) = fs::metadata(&self.path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!(error = %e, path = %self.path.display(), "failed to remove session file");
            }
        }
    }
}

/// Invalidation policy for the CLI: tell the user to log in again.
/// The dispatcher has already cleared the stored token when this fires.
struct ExpiredSessionNotice;

impl InvalidationHook for ExpiredSessionNotice {
    fn session_invalidated(&self) {
        output::error("Session expired. Run 'vantage login' to sign in again.");
    }
}

/// Build a session controller against the given backend URL, backed by
/// the persisted session file.
pub fn connect(api: &str) -> Result<SessionController> {
    let base = ApiUrl::new(api).context("Invalid API URL")?;
    let store = Arc::new(FileTokenStore::open()?);
    let dispatcher = Dispatcher::with_hook(base, store, Arc::new(ExpiredSessionNotice));
    Ok(SessionController::new(dispatcher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("session.json"));

        assert!(store.get().is_none());

        store.set(AccessToken::new("abc123"));
        assert_eq!(store.get().unwrap().as_str(), "abc123");

        store.clear();
        assert!(store.get().is_none());
        store.clear(); // idempotent
    }

    #[test]
    fn corrupt_session_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::at(path);
        assert!(store.get().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::at(path.clone());

        store.set(AccessToken::new("abc123"));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
