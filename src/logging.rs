//! Provisioning log: console output mirrored into an append-mode log file.
//!
//! The subscriber is built explicitly and installed as the default for the
//! current thread only. The returned [`LogGuard`] keeps it installed; dropping
//! the guard restores whatever was there before.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Console verbosity selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool, debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    fn level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            // The log file is the provisioning record, so info is the default
            Verbosity::Normal | Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Keeps the provisioning subscriber installed while alive
pub struct LogGuard {
    path: PathBuf,
    _default: DefaultGuard,
}

impl LogGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Build the console + file subscriber and install it for this thread
pub fn init(log_file: &Path, verbosity: Verbosity) -> Result<LogGuard> {
    let file = open_log_file(log_file)?;

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity.level())
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        );

    Ok(LogGuard {
        path: log_file.to_path_buf(),
        _default: tracing::subscriber::set_default(subscriber),
    })
}
