//! tracing setup. `RUST_LOG` wins over the config's `log.filter`.
//!
//! The full-screen UI owns the terminal, so it only logs when a file is given.
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ensure_parent_dir;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogSink {
    /// Sink for a command: an explicit file always wins; otherwise terminal
    /// commands log to stderr and the TUI stays quiet.
    pub fn choose(file: Option<PathBuf>, fullscreen: bool) -> Self {
        match (file, fullscreen) {
            (Some(p), _) => LogSink::File(p),
            (None, false) => LogSink::Stderr,
            (None, true) => LogSink::Off,
        }
    }
}

pub fn init(default_filter: &str, sink: LogSink) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, ansi) = match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogSink::File(path) => {
            ensure_parent_dir(&path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    // try_init: a second init (tests, re-entry) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .try_init();
    Ok(())
}
