mod clipboard;
mod config;
mod editor;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{default_config_path, Args, TuiConfig};
use crate::editor::TuiEditor;

fn init_logging(config: &TuiConfig, args: &Args) -> Result<()> {
    let path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    // The terminal belongs to the UI, so logs go to a file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = TuiConfig::load(&config_path)?;
    init_logging(&config, &args)?;
    info!(config = %config_path.display(), "starting quill");

    let mut editor = TuiEditor::new(&config, args.file.as_deref());
    editor.run()
}
