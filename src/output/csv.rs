//! CSV report serialization and persistence.
//!
//! The report is a header row followed by one row per user, CRLF-terminated,
//! with fields quoted only when necessary. Files are written to a sibling
//! temporary file and renamed into place, so the target path only ever holds
//! a complete report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::debug;

use crate::constants::REPORT_HEADER;
use crate::models::ReportRow;

/// Errors while persisting the report.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("invalid report path {path}")]
    InvalidPath { path: PathBuf },

    #[error("failed to create {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to replace {path}: {source}")]
    Replace { path: PathBuf, source: io::Error },
}

/// Serialize the header and rows to any writer.
pub fn write_report<W: Write>(out: W, rows: &[ReportRow]) -> io::Result<W> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(REPORT_HEADER).map_err(io::Error::from)?;
    for row in rows {
        writer.write_record(row.fields()).map_err(io::Error::from)?;
    }

    writer.into_inner().map_err(|e| e.into_error())
}

/// Write the report to `path`, replacing any existing file.
///
/// An existing target must be writable by the caller; its permissions carry
/// over to the replacement.
pub fn save_report(path: &Path, rows: &[ReportRow]) -> Result<(), PersistenceError> {
    let tmp_path = temp_path_for(path)?;
    let existing = check_target_writable(path)?;
    debug!(path = %path.display(), tmp = %tmp_path.display(), "writing report");

    let file = fs::File::create(&tmp_path).map_err(|e| PersistenceError::Create {
        path: tmp_path.clone(),
        source: e,
    })?;

    let written = write_report(file, rows)
        .and_then(|file| file.sync_all())
        .and_then(|()| match existing {
            Some(permissions) => fs::set_permissions(&tmp_path, permissions),
            None => Ok(()),
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(PersistenceError::Write {
            path: tmp_path,
            source: e,
        });
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PersistenceError::Replace {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Open an existing target for writing without truncating it, so a
/// read-only report is refused rather than renamed over.
fn check_target_writable(path: &Path) -> Result<Option<fs::Permissions>, PersistenceError> {
    let create_err = |e| PersistenceError::Create {
        path: path.to_path_buf(),
        source: e,
    };

    match fs::metadata(path) {
        Ok(meta) => {
            fs::OpenOptions::new()
                .write(true)
                .open(path)
                .map_err(create_err)?;
            Ok(Some(meta.permissions()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(create_err(e)),
    }
}

/// `dir/report.csv` → `dir/.report.csv.tmp`
fn temp_path_for(path: &Path) -> Result<PathBuf, PersistenceError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| PersistenceError::InvalidPath {
            path: path.to_path_buf(),
        })?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");

    Ok(match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}
