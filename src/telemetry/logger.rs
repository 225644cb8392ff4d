//! # Flight Status Logger
//!
//! Records mapped flight status snapshots as JSON Lines, one file per
//! `max_records_per_file` records, keeping only the newest `max_files_to_keep`
//! files in the log directory.
//!
//! Each line looks like:
//!
//! ```text
//! {"recorded_at":"2026-10-19T10:11:12.345Z","status":{"battery_low":false,...}}
//! ```

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::bridge::observer::StatusObserver;
use crate::config::RecordingConfig;
use crate::convert::FlightStatusRecord;
use crate::error::Result;

/// File name prefix of every log file written by [`TelemetryLogger`].
pub const LOG_FILE_PREFIX: &str = "flight_status_";

/// File extension of log files.
pub const LOG_FILE_EXTENSION: &str = "jsonl";

#[derive(Serialize)]
struct LogEntry<'a> {
    recorded_at: String,
    status: &'a FlightStatusRecord,
}

/// Rotating JSONL writer for [`FlightStatusRecord`]s.
///
/// # Examples
///
/// ```no_run
/// use tello_bridge::telemetry::logger::TelemetryLogger;
///
/// let logger = TelemetryLogger::with_limits("./logs", 10_000, 10)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct TelemetryLogger {
    log_dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    current_path: Option<PathBuf>,
    records_in_file: usize,
    file_seq: u64,
}

impl std::fmt::Debug for TelemetryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryLogger")
            .field("log_dir", &self.log_dir)
            .field("current_path", &self.current_path)
            .field("records_in_file", &self.records_in_file)
            .finish_non_exhaustive()
    }
}

impl TelemetryLogger {
    /// Creates a logger from the `[recording]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns error if the log directory cannot be created
    pub fn new(config: &RecordingConfig) -> Result<Self> {
        Self::with_limits(&config.log_dir, config.max_records_per_file, config.max_files_to_keep)
    }

    /// Creates a logger writing into `log_dir`.
    ///
    /// Limits of zero are treated as one.
    ///
    /// # Errors
    ///
    /// Returns error if the log directory cannot be created
    pub fn with_limits<P: AsRef<Path>>(
        log_dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        let log_dir = log_dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir)?;
        info!("Recording flight status to {}", log_dir.display());

        Ok(Self {
            log_dir,
            max_records_per_file: max_records_per_file.max(1),
            max_files_to_keep: max_files_to_keep.max(1),
            writer: None,
            current_path: None,
            records_in_file: 0,
            file_seq: 0,
        })
    }

    /// Path of the file currently being written, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Appends one record, rotating files as needed.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written
    pub fn log_record(&mut self, record: &FlightStatusRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let entry = LogEntry {
            recorded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: record,
        };

        if let Some(writer) = self.writer.as_mut() {
            serde_json::to_writer(&mut *writer, &entry)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        self.records_in_file += 1;

        Ok(())
    }

    /// Starts a new file and prunes old ones.
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        self.file_seq += 1;
        let name = format!(
            "{}{}_{:04}.{}",
            LOG_FILE_PREFIX,
            Utc::now().format("%Y%m%dT%H%M%S%.3f"),
            self.file_seq,
            LOG_FILE_EXTENSION
        );
        let path = self.log_dir.join(name);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!("Opened flight status log {}", path.display());

        self.writer = Some(BufWriter::new(file));
        self.current_path = Some(path);
        self.records_in_file = 0;

        self.prune()
    }

    /// Deletes the oldest log files beyond `max_files_to_keep`.
    ///
    /// The file currently being written always counts as the newest, even if
    /// the wall clock stepped backwards since older names were stamped.
    fn prune(&self) -> Result<()> {
        let mut files: Vec<PathBuf> = list_log_files(&self.log_dir)?
            .into_iter()
            .filter(|path| Some(path) != self.current_path.as_ref())
            .collect();
        let keep_older = self.max_files_to_keep - 1;
        if files.len() <= keep_older {
            return Ok(());
        }

        // Names embed the creation time, so lexical order is age order.
        files.sort();
        let excess = files.len() - keep_older;
        for path in files.into_iter().take(excess) {
            debug!("Removing old flight status log {}", path.display());
            fs::remove_file(&path)?;
        }

        Ok(())
    }
}

impl StatusObserver for TelemetryLogger {
    fn observe(&mut self, record: &FlightStatusRecord) {
        if let Err(e) = self.log_record(record) {
            warn!("Failed to record flight status: {}", e);
        }
    }
}

/// Lists log files written by [`TelemetryLogger`] in `dir`.
///
/// # Errors
///
/// Returns error if the directory cannot be read
pub fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(LOG_FILE_PREFIX) && n.ends_with(LOG_FILE_EXTENSION))
            .unwrap_or(false);
        if is_log && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
