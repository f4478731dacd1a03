use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Trendwave API (account + location services)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// UI theme: "dark", "light", or "no-color"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// How long toast notifications stay on screen, in seconds
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

fn default_api_url() -> String {
    "https://api.trendwave.app/api".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_toast_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
            toast_secs: default_toast_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file or create the default one on disk
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config =
                toml::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_default() {
        let config = Config::default();
        assert!(config.api_url.starts_with("https://"));
        assert_eq!(config.theme, "dark");
        assert_eq!(config.toast_secs, 5);
    }

    #[test]
    fn config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.api_url = "http://localhost:5000/api".to_string();
        config.save(&config_path).unwrap();

        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:5000/api");
    }

    #[test]
    fn load_or_create_writes_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.api_url, default_api_url());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("api_url = \"http://x/api\"").unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.toast_secs, 5);
    }
}
