//! Event log - appends classified crossings to file
//!
//! One human-readable line per event, `YYYY-MM-DD HH:MM:SS - Entry|Exit`,
//! appended to the file named in config. The file is never truncated or
//! rewritten.

use crate::domain::types::DoorEvent;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Append-only writer for classified events
pub struct EventLog {
    file_path: String,
}

impl EventLog {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "event_log_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write one event to the log file
    /// Returns true if successful, false otherwise
    pub fn record(&self, event: &DoorEvent) -> bool {
        let line = event.log_line();

        match self.append_line(&line) {
            Ok(()) => {
                debug!(
                    direction = %event.direction,
                    timestamp = %event.timestamp(),
                    "event_logged"
                );
                true
            }
            Err(e) => {
                error!(
                    direction = %event.direction,
                    file = %self.file_path,
                    error = %e,
                    "event_log_write_failed"
                );
                false
            }
        }
    }

    /// Append a line to the log file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;

        Ok(())
    }
}
