//! CSV export of session history.
//!
//! Rows append to an existing file; headers are written only when the file
//! is empty so repeated exports stay well-formed.

use crate::{Result, Session, SessionType};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    #[serde(rename = "type")]
    session_type: &'static str,
    duration_seconds: u32,
    completed_at: String,
}

impl From<&Session> for CsvRow {
    fn from(session: &Session) -> Self {
        CsvRow {
            id: session.id.to_string(),
            session_type: match session.session_type {
                SessionType::Meditation => "meditation",
                SessionType::Journaling => "journaling",
            },
            duration_seconds: session.duration_seconds,
            completed_at: session.completed_at.to_rfc3339(),
        }
    }
}

/// Append sessions to a CSV file, returning the number of rows written
pub fn export_sessions(sessions: &[Session], csv_path: &Path) -> Result<usize> {
    if sessions.is_empty() {
        tracing::info!("No sessions to export");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    // Headers only when the file has no content yet
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for session in sessions {
        writer.serialize(CsvRow::from(session))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} sessions to {:?}", sessions.len(), csv_path);
    Ok(sessions.len())
}
