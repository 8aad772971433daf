//! Configuration management for batch ingestion

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_root: Option<PathBuf>,
    pub keep_going: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input_files"),
            output_root: None,
            keep_going: false,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "audio-ingester", about = "WAV metadata ingester", version)]
pub struct Args {
    #[arg(help = "Input directory containing .wav files")]
    pub input_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "output-root",
        help = "Directory receiving the timestamped output directory (default: 'output' next to the input directory)"
    )]
    pub output_root: Option<PathBuf>,

    #[arg(
        short = 'k',
        long = "keep-going",
        help = "Continue with remaining files after a per-file failure"
    )]
    pub keep_going: bool,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        // First load config file (if provided)
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.input_dir = args.input_dir;
        if args.output_root.is_some() {
            config.output_root = args.output_root;
        }
        if args.keep_going {
            config.keep_going = true;
        }
        if args.verbose {
            config.verbose = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IngestError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| IngestError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| IngestError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| IngestError::config(format!("Failed to write config file: {}", e)))
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(IngestError::config("Input directory must not be empty"));
        }

        Ok(())
    }
}
