#![forbid(unsafe_code)]

//! Log setup. The terminal belongs to the screen, so logs only go to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "INVVIEW_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Filter from [`LOG_ENV`], or `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber appending to `path`.
///
/// Does nothing without a path.
pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_a_no_op() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn events_land_in_the_log_file() {
        let path = std::env::temp_dir().join(format!("invview-log-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        init(Some(&path)).unwrap();
        tracing::warn!(target: "invview.test", "written to file");
        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(contents.contains("written to file"));
        assert!(contents.contains("invview.test"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = std::env::temp_dir();
        assert!(init(Some(&dir)).is_err());
    }
}
