//! Flat-file state shared by the operator commands and the monitor.
//!
//! Four files live under one directory: the watch list (newline-separated
//! store ids, append-only), the poll interval (whole hours), the region code
//! and the webhook URL (each a whole-file value). A missing file yields the
//! default value. Every write is flushed to disk before returning.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{ConfigError, Region};

pub const WATCH_LIST_FILE: &str = "store_ids";
pub const INTERVAL_FILE: &str = "check_intervaltimer.txt";
pub const REGION_FILE: &str = "country_selection.txt";
pub const WEBHOOK_FILE: &str = "webhook_url.txt";

const SECS_PER_HOUR: u64 = 3600;

/// Scalar settings read at the top of every monitor cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorConfig {
    /// Zero means the interval has never been set.
    pub interval: Duration,
    pub region: Option<Region>,
    /// Dispatch is disabled while this is `None`.
    pub webhook: Option<String>,
}

/// Handle on the state directory. Holds no cached values; every `load_*`
/// goes back to disk so edits made between cycles are picked up.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns watched store ids in insertion order. Blank lines are skipped;
    /// duplicates are returned as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read.
    pub fn load_watch_list(&self) -> Result<Vec<String>, ConfigError> {
        let Some(content) = self.read_optional(WATCH_LIST_FILE)? else {
            return Ok(Vec::new());
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Appends one store id to the watch list. No dedup, no reordering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty id or one containing
    /// whitespace, and [`ConfigError::Write`] if the append fails.
    pub fn append_to_watch_list(&self, store_id: &str) -> Result<(), ConfigError> {
        let path = self.path(WATCH_LIST_FILE);
        let store_id = store_id.trim();
        if store_id.is_empty() || store_id.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                path,
                reason: format!("store id '{store_id}' must be non-empty and contain no whitespace"),
            });
        }

        self.ensure_dir()?;
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(write_err)?;
        if !ends_with_newline(&mut file).map_err(write_err)? {
            writeln!(file).map_err(write_err)?;
        }
        writeln!(file, "{store_id}").map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        Ok(())
    }

    /// Returns the poll interval, or [`Duration::ZERO`] when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::InvalidValue`] if it does not hold a whole number of hours.
    pub fn load_interval(&self) -> Result<Duration, ConfigError> {
        let Some(content) = self.read_optional(INTERVAL_FILE)? else {
            return Ok(Duration::ZERO);
        };
        let raw = content.trim();
        if raw.is_empty() {
            return Ok(Duration::ZERO);
        }
        let hours = raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                path: self.path(INTERVAL_FILE),
                reason: format!("'{raw}' is not a whole number of hours: {e}"),
            })?;
        Ok(Duration::from_secs(hours.saturating_mul(SECS_PER_HOUR)))
    }

    /// Persists the interval as whole hours; any sub-hour remainder is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be replaced.
    pub fn save_interval(&self, interval: Duration) -> Result<(), ConfigError> {
        let hours = interval.as_secs() / SECS_PER_HOUR;
        self.overwrite(INTERVAL_FILE, &hours.to_string())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::InvalidValue`] if it holds an unknown region code.
    pub fn load_region(&self) -> Result<Option<Region>, ConfigError> {
        let Some(content) = self.read_optional(REGION_FILE)? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        content
            .parse::<Region>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                path: self.path(REGION_FILE),
                reason: e.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be replaced.
    pub fn save_region(&self, region: Region) -> Result<(), ConfigError> {
        self.overwrite(REGION_FILE, region.code())
    }

    /// Returns the webhook URL, or `None` when unset or blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read.
    pub fn load_webhook(&self) -> Result<Option<String>, ConfigError> {
        Ok(self
            .read_optional(WEBHOOK_FILE)?
            .map(|content| content.trim().to_string())
            .filter(|url| !url.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank URL or one containing
    /// whitespace, and [`ConfigError::Write`] if the file cannot be replaced.
    pub fn save_webhook(&self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if url.is_empty() || url.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                path: self.path(WEBHOOK_FILE),
                reason: "webhook URL must be non-empty and contain no whitespace".to_string(),
            });
        }
        self.overwrite(WEBHOOK_FILE, url)
    }

    /// Reads interval, region and webhook in one go.
    ///
    /// # Errors
    ///
    /// Propagates the first error from the individual loaders.
    pub fn load_monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        Ok(MonitorConfig {
            interval: self.load_interval()?,
            region: self.load_region()?,
            webhook: self.load_webhook()?,
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_optional(&self, name: &str) -> Result<Option<String>, ConfigError> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir).map_err(|source| ConfigError::Write {
            path: self.dir.clone(),
            source,
        })
    }

    /// Replaces a whole-value file via a synced temp file and a rename, so a
    /// crash mid-write leaves either the old value or the new one.
    fn overwrite(&self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.ensure_dir()?;
        let path = self.path(name);
        let tmp = self.path(&format!("{name}.tmp"));
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        let mut file = File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }
}

/// `true` for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
