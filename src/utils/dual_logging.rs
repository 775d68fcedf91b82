use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use crate::utils::app_paths::AppPaths;

/// Global dual logger instance
static DUAL_LOGGER: OnceLock<DualLogger> = OnceLock::new();

/// Log directory, falling back to the temp dir when the data dir is unusable
fn get_log_dir() -> PathBuf {
    AppPaths::log_dir().unwrap_or_else(|_| std::env::temp_dir().join("table-cli"))
}

/// File half of the logging setup; the ring buffer half lives in `logging`
pub struct DualLogger {
    log_file: Mutex<Option<File>>,
    log_path: PathBuf,
}

impl DualLogger {
    pub fn new() -> Self {
        let log_dir = get_log_dir();

        // Create log directory if it doesn't exist
        let _ = std::fs::create_dir_all(&log_dir);

        // Create timestamped log file
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("table-cli_{}.log", timestamp));

        #[cfg(unix)]
        {
            // Keep a stable "latest.log" name to tail
            let latest_path = log_dir.join("latest.log");
            let _ = std::fs::remove_file(&latest_path);
            let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
        }

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        Self {
            log_file: Mutex::new(log_file),
            log_path,
        }
    }

    /// Append one line to the log file
    pub fn log(&self, timestamp: &str, level: &str, target: &str, message: &str) {
        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(ref mut file) = *file_opt {
                let log_line = format!("[{}] {} [{}] {}\n", timestamp, level, target, message);
                let _ = file.write_all(log_line.as_bytes());
                let _ = file.flush(); // Important for crash debugging!
            }
        }
    }

    /// Get the log file path
    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Force flush the log file
    pub fn flush(&self) {
        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(ref mut file) = *file_opt {
                let _ = file.flush();
            }
        }
    }
}

impl Default for DualLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the global dual logger
pub fn init_dual_logger() -> &'static DualLogger {
    DUAL_LOGGER.get_or_init(DualLogger::new)
}
