mod app;
mod config;
mod error;
mod ui;

use crate::error::Result;

const LOG_PATH: &str = "salvadanaio_tui.log";

fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;
    let mut app = app::App::new(config)?;
    app.run()?;
    Ok(())
}

/// Logs go to a file: stdout belongs to the alternate screen.
fn init_logging(config: &config::AppConfig) -> Result<()> {
    let log_file = std::fs::File::create(LOG_PATH)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "salvadanaio_tui={level}",
            level = config.level
        ))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
