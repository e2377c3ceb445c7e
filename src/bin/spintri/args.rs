use std::path::PathBuf;

use clap::Parser;

use log::LevelFilter;

use spintri::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(about = "Spinning, bouncing OpenGL triangle")]
pub struct Args {
    /// JSON5 file with window and animation settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Window width, overrides the config file
    #[arg(long)]
    pub width: Option<u32>,
    /// Window height, overrides the config file
    #[arg(long)]
    pub height: Option<u32>,
    /// Pulse the triangle's scale between the configured limits
    #[arg(long)]
    pub animate_scale: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Defaults, then the config file, then command line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Reading config from {:?}", path);
                Config::load_from_path(path)?
            }
            None => Config::default(),
        };

        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.animate_scale {
            config.animation.animate_scale = true;
        }

        config.validate()?;

        Ok(config)
    }
}
