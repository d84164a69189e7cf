use std::fs;
use std::path::{Path, PathBuf};
use chrono::Local;
use tracing::info;

use crate::error::LoggerError;
use crate::form::save_log;
use crate::parser::load_log;
use crate::tracker::EventRecord;

/// A directory of CSV match logs
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    /// Opens the store, creating the directory if needed
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, LoggerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LogStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all selectable `.csv` logs, sorted
    pub fn list(&self) -> Result<Vec<String>, LoggerError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path.extension().map(|e| e.eq_ignore_ascii_case("csv")).unwrap_or(false);
            if !path.is_file() || !is_csv {
                continue;
            }
            // only names that can be selected again
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if matches!(Self::normalize_name(name), Ok(n) if n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Normalizes a user-supplied log name, appending `.csv` when missing
    pub fn normalize_name(name: &str) -> Result<String, LoggerError> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.contains('/')
            || trimmed.contains('\\')
            || trimmed.contains("..")
            || trimmed.starts_with('.')
        {
            return Err(LoggerError::InvalidLogName(name.to_string()));
        }

        if trimmed.to_ascii_lowercase().ends_with(".csv") {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("{}.csv", trimmed))
        }
    }

    /// Maps a log name to its path inside the store
    pub fn resolve(&self, name: &str) -> Result<PathBuf, LoggerError> {
        Ok(self.dir.join(Self::normalize_name(name)?))
    }

    pub fn load(&self, name: &str) -> Result<Vec<EventRecord>, LoggerError> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(LoggerError::LogNotFound(name.to_string()));
        }
        load_log(&path)
    }

    /// Rewrites the whole log
    pub fn save(&self, name: &str, entries: &[EventRecord]) -> Result<(), LoggerError> {
        let path = self.resolve(name)?;
        save_log(&path, entries)
    }

    /// Creates an empty log with just the header row
    ///
    /// Without a name, one is generated from the current local time.
    pub fn create(&self, name: Option<&str>) -> Result<String, LoggerError> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => Self::normalize_name(n)?,
            None => Local::now().format("match_%Y%m%d_%H%M%S.csv").to_string(),
        };

        let path = self.dir.join(&name);
        if path.exists() {
            return Err(LoggerError::LogExists(name));
        }

        save_log(&path, &[])?;
        info!(log = %name, "created match log");
        Ok(name)
    }
}
