use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use taskdesk::config::Config;
use taskdesk::logger::Logger;
use taskdesk::ui;

#[derive(Parser)]
#[command(name = "taskdesk", about = "Browse and edit tasks from the terminal", version)]
struct Cli {
    /// Configuration file (defaults to ./taskdesk.toml, then the XDG config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    init_config: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.init_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(&config.logging)?;
    logger
        .install(config.logging.level_filter()?)
        .context("Failed to set up logging")?;

    ui::run_app(config, logger).await
}
