//! Persisted authentication session.
//!
//! The original client kept a bare "authenticated" flag in browser storage
//! and flipped it from several places. Here the session is an explicit value
//! owned by this module, read and written through exactly one accessor pair
//! (`load` / `store`), and only ever set from a successful login payload.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Authentication session state, persisted as JSON next to the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Whether the user is currently authenticated
    pub authenticated: bool,
    /// Display identity of the signed-in user (email or username)
    pub user: Option<String>,
}

impl Session {
    /// Session for a user who just authenticated.
    pub fn logged_in(user: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            user: Some(user.into()),
        }
    }

    /// Signed-out session.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Display identity of the signed-in user, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Load the session from disk. A missing or unreadable file is treated
    /// as signed out rather than an error: the server remains authoritative.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Persist the session to disk.
    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_signed_out() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::load(&temp_dir.path().join("absent.json"));
        assert!(!session.authenticated);
        assert!(session.user.is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let session = Session::logged_in("ada@example.com");
        session.store(&path).unwrap();

        let loaded = Session::load(&path);
        assert!(loaded.authenticated);
        assert_eq!(loaded.user.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn corrupt_file_falls_back_to_signed_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let session = Session::load(&path);
        assert_eq!(session, Session::logged_out());
    }

    #[test]
    fn logout_overwrites_login() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        Session::logged_in("ada").store(&path).unwrap();
        Session::logged_out().store(&path).unwrap();

        assert!(!Session::load(&path).authenticated);
    }
}
