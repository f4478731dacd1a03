//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

/// Terminal client for the Trendwave task marketplace
#[derive(Parser, Debug)]
#[command(
    name = "trendwave",
    version,
    about = "Terminal client for the Trendwave task marketplace",
    long_about = None
)]
pub struct Cli {
    /// Path to the config file (defaults to the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// UI theme: dark, light, or no-color
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "trendwave",
            "--api-url",
            "http://localhost:5000/api",
            "--theme",
            "light",
            "--config",
            "/tmp/tw.toml",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5000/api"));
        assert_eq!(cli.theme.as_deref(), Some("light"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tw.toml")));
    }

    #[test]
    fn defaults_to_no_overrides() {
        let cli = Cli::parse_from(["trendwave"]);
        assert!(cli.api_url.is_none());
        assert!(cli.theme.is_none());
    }
}
