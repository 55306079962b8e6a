//! This file starts the shoring calculator by watching the form file and opening the viewer.

use std::{env, fs, io, path::PathBuf};

use color_eyre::{config::HookBuilder, eyre::WrapErr, Result};
use tracing_subscriber::EnvFilter;
use viewer::{FileWatcher, Window};

/// The form file read if no path is given on the command line.
const DEFAULT_PATH: &str = "shoring.toml";

fn main() -> Result<()> {
    HookBuilder::new().display_env_section(false).install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from);

    if !config_path.exists() {
        fs::write(&config_path, config::DEFAULT_CONFIG).wrap_err_with(|| {
            format!("failed to create the form file {}", config_path.display())
        })?;
        tracing::info!(path = %config_path.display(), "created default form file");
    }

    let window = Window::try_new()?;
    let _watcher = FileWatcher::try_new(&config_path, window.updater())
        .and_then(FileWatcher::watch)
        .wrap_err("failed to watch the form file")?;

    window.run_render_loop(config_path.with_extension("csv"));

    Ok(())
}
