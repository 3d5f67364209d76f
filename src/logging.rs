//! Logging setup for the terminal binary.
//!
//! The screen is in raw mode while a race runs, so events go to a log file
//! under the platform data dir instead of stderr.

use directories::ProjectDirs;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "typerace").map(|pd| pd.data_local_dir().join("typerace.log"))
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing. `RUST_LOG` wins over the verbosity flag.
/// Logging stays off when no log file can be opened.
pub fn init_logging(verbose: u8) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typerace={}", level_for(verbose))));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .try_init()
        .is_ok();

    if initialized {
        debug!(path = %path.display(), "logging to file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }
}
