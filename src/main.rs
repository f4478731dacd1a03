use anyhow::Result;
use clap::Parser;
use trendwave::app::App;
use trendwave::cli::Cli;
use trendwave::config::Config;
use trendwave::styles::{init_theme, ThemeType};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    // File logging; the terminal belongs to the TUI.
    let log_dir = trendwave::utils::get_cache_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("trendwave.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(&log_dir, "trendwave.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    eprintln!("Logs are being written to: {:?}", log_file);

    let config_path = cli
        .config
        .unwrap_or_else(trendwave::utils::get_config_path);
    let mut config = Config::load_or_create(&config_path)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let theme_type = config.theme.parse().unwrap_or(ThemeType::Dark);
    init_theme(theme_type);

    let mut app = App::new(config)?;
    let result = app.run();

    drop(guard);
    result
}
