//! Command-line arguments and the optional TOML config file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use quill_core::EngineConfig;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "A minimal CRLF text editor for the terminal")]
pub struct Args {
    /// File to edit. Created on first save if it does not exist.
    pub file: Option<PathBuf>,

    /// Config file (defaults to ~/.config/quill/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the configured location
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub engine: EngineConfig,
    /// Default filter when `RUST_LOG` is not set.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Lines kept visible above and below the cursor.
    pub scroll_padding: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                cursor_blink_frames: 5,
                ..EngineConfig::default()
            },
            log_level: "info".to_string(),
            log_file: None,
            scroll_padding: 2,
        }
    }
}

impl TuiConfig {
    /// Reads `path`, or returns defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("quill.log"))
    }
}

pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("quill")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: TuiConfig = toml::from_str(
            r#"
            scroll_padding = 4

            [engine]
            max_lines = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll_padding, 4);
        assert_eq!(config.engine.max_lines, 500);
        assert_eq!(config.engine.tab_width, EngineConfig::DEFAULT_TAB_WIDTH);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = TuiConfig::load(Path::new("/nonexistent/quill/config.toml")).unwrap();
        assert_eq!(config.scroll_padding, 2);
    }
}
