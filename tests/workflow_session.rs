//! Integration tests for config and session persistence.

use anyhow::Result;
use tempfile::TempDir;
use trendwave::config::Config;
use trendwave::session::Session;

#[test]
fn first_run_writes_default_config_and_signed_out_session() -> Result<()> {
    // Given: fresh system, nothing on disk.
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");
    let session_path = temp_dir.path().join("session.json");

    // When: the app loads config and session.
    let config = Config::load_or_create(&config_path)?;
    let session = Session::load(&session_path);

    // Then: config exists with defaults, session is signed out.
    assert!(config_path.exists());
    assert!(config.api_url.starts_with("https://"));
    assert!(!session.authenticated);
    Ok(())
}

#[test]
fn login_then_logout_round_trips_through_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let session_path = temp_dir.path().join("session.json");

    // A successful login persists the identity.
    Session::logged_in("chidi@example.com").store(&session_path)?;
    let restored = Session::load(&session_path);
    assert!(restored.authenticated);
    assert_eq!(restored.user(), Some("chidi@example.com"));

    // Logout overwrites it with a signed-out session.
    Session::logged_out().store(&session_path)?;
    let restored = Session::load(&session_path);
    assert!(!restored.authenticated);
    assert!(restored.user().is_none());
    Ok(())
}

#[test]
fn config_overrides_survive_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::load_or_create(&config_path)?;
    config.api_url = "http://localhost:5000/api".to_string();
    config.theme = "light".to_string();
    config.save(&config_path)?;

    let reloaded = Config::load_or_create(&config_path)?;
    assert_eq!(reloaded.api_url, "http://localhost:5000/api");
    assert_eq!(reloaded.theme, "light");
    Ok(())
}

#[cfg(unix)]
#[test]
fn config_file_is_owner_only() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");
    Config::default().save(&config_path)?;

    let mode = std::fs::metadata(&config_path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}
