//! Tracing setup.
//!
//! The TUI owns the terminal, so while it runs logs go to
//! `<state dir>/tuxagotchi/tuxagotchi.log`. One-shot commands log to stderr.
//! Verbosity comes from `TUXAGOTCHI_LOG` (an `EnvFilter` directive).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TUXAGOTCHI_LOG";

/// Where log lines should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(target: LogTarget) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        LogTarget::File => match open_log_file() {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(_) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::sink)
                    .try_init();
            }
        },
    }
}

/// `<state dir>/tuxagotchi/tuxagotchi.log`, falling back to the local data dir.
pub fn log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join("tuxagotchi").join("tuxagotchi.log"))
}

fn open_log_file() -> io::Result<fs::File> {
    let path = log_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no state directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
