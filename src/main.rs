use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a board whose edges wrap around")]
struct Cli {
    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// JSON file holding a game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log; the terminal itself is taken by the game
    #[arg(long, default_value = "torus_snake.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "starting with a {}x{} board",
        config.grid_width, config.grid_height
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
