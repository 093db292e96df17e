use hubview_core::config::APP_NAME;
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "hubview.log";
const MAX_LOG_FILE_MB: u64 = 10;
const KEPT_LOG_FILES: u32 = 10;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// `$XDG_CACHE_HOME/hubview`, else `~/.cache/hubview`. An empty
/// `XDG_CACHE_HOME` counts as unset.
fn unix_cache_dir(xdg_cache_home: Option<String>, home: Option<PathBuf>) -> PathBuf {
    match xdg_cache_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir).join(APP_NAME),
        None => home
            .unwrap_or_else(std::env::temp_dir)
            .join(".cache")
            .join(APP_NAME),
    }
}

pub fn cache_dir() -> PathBuf {
    if cfg!(windows) {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    } else {
        unix_cache_dir(std::env::var("XDG_CACHE_HOME").ok(), dirs::home_dir())
    }
}

pub fn default_log_file() -> PathBuf {
    cache_dir().join(LOG_FILE_NAME)
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Route the `log` facade to a rotating file; the terminal belongs to the TUI.
/// Returns the file being written.
pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<PathBuf> {
    let log_file = default_log_file();
    ensure_parent(&log_file)?;
    simple_log::file(
        log_file.to_string_lossy().into_owned(),
        level,
        MAX_LOG_FILE_MB,
        KEPT_LOG_FILES,
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("logging to {} at {level}", log_file.display());
    Ok(log_file)
}
