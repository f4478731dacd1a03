use std::path::PathBuf;

/// Get the home directory, with fallback to "/"
fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (always ~/.config/trendwave, regardless of OS)
pub fn get_config_dir() -> PathBuf {
    get_home_dir().join(".config").join("trendwave")
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Get the persisted session file path
pub fn get_session_path() -> PathBuf {
    get_config_dir().join("session.json")
}

/// Get the cache directory used for log files
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("trendwave")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_share_a_directory() {
        let dir = get_config_dir();
        assert!(get_config_path().starts_with(&dir));
        assert!(get_session_path().starts_with(&dir));
    }
}
