use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::AnalysisError;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row in {path} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid profile in {path}: {reason}")]
    InvalidProfile { path: PathBuf, reason: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl DataError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A single captured packet: only the arrival time and the wire length matter here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketRecord {
    pub timestamp: f64, // seconds
    pub length: i64,    // bytes
}

impl PacketRecord {
    pub fn new(timestamp: f64, length: i64) -> Self {
        Self { timestamp, length }
    }
}

pub struct RawCsvReader;

impl RawCsvReader {
    /// Read `Timestamp,Source IP,Destination IP,Protocol,Length` rows from a capture export.
    pub fn read_file(path: &Path) -> Result<Vec<PacketRecord>, DataError> {
        let content = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let records = Self::parse_str(&content).map_err(|(line, reason)| DataError::Parse {
            path: path.to_path_buf(),
            line,
            reason,
        })?;

        log::info!("Loaded {} packets from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse CSV content. The first line is a header and is ignored.
    ///
    /// On failure returns the 1-based line number and a description; nothing is kept.
    pub fn parse_str(content: &str) -> Result<Vec<PacketRecord>, (usize, String)> {
        let mut records = Vec::new();

        for (idx, line) in content.lines().enumerate().skip(1) {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            match Self::parse_line(line) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => log::debug!("Skipping row {} without a length field", line_no),
                Err(reason) => return Err((line_no, reason)),
            }
        }

        Ok(records)
    }

    /// Parse a single data row. `Ok(None)` means the row carries no length and is skipped.
    pub fn parse_line(line: &str) -> Result<Option<PacketRecord>, String> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let timestamp_field = fields[0];
        let timestamp: f64 = timestamp_field
            .parse()
            .map_err(|_| format!("invalid timestamp '{}'", timestamp_field))?;
        if !timestamp.is_finite() {
            return Err(format!("non-finite timestamp '{}'", timestamp_field));
        }

        // Source IP, destination IP and protocol (fields 2-4) are not used
        let length_field = match fields.get(4) {
            Some(field) if !field.is_empty() => *field,
            _ => return Ok(None),
        };
        let length: i64 = length_field
            .parse()
            .map_err(|_| format!("invalid length '{}'", length_field))?;

        Ok(Some(PacketRecord::new(timestamp, length)))
    }
}
