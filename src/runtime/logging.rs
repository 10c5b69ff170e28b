use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::config::{self, LogSettings};

/// Send log records to a file; the terminal belongs to the TUI.
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(settings: &LogSettings) -> io::Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(config::default_log_path)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no log directory"))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)?;
    Ok(path)
}
