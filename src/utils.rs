/// Utility functions used throughout the application

use std::path::{Path, PathBuf};

/// Debug log file name inside the temp dir
pub const DEBUG_LOG_FILE: &str = "qrtui-debug.log";

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(DEBUG_LOG_FILE);
    path
}

/// Shorten a path for the status bar by replacing the home dir with `~`
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
