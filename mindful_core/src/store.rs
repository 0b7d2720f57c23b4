//! Session persistence backends.
//!
//! The canonical history is a JSONL (JSON Lines) append log with file
//! locking for safe concurrent access. Deletion rewrites the log atomically
//! through a temp file in the same directory.

use crate::{Error, Result, Session};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Storage backend contract for session history.
///
/// `list` returns sessions ordered by `completed_at` descending; ties keep
/// reverse insertion order. `delete` semantics differ per backend: the
/// single-user backend treats a missing id as a silent no-op (`Ok(None)`),
/// the user-scoped backend reports it as `Error::NotFound`.
pub trait SessionStore {
    fn save(&mut self, session: &Session) -> Result<()>;
    fn list(&self, limit: Option<usize>) -> Result<Vec<Session>>;
    fn delete(&mut self, id: Uuid) -> Result<Option<Session>>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn save(&mut self, session: &Session) -> Result<()> {
        (**self).save(session)
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<Session>> {
        (**self).list(limit)
    }

    fn delete(&mut self, id: Uuid) -> Result<Option<Session>> {
        (**self).delete(id)
    }
}

/// Single-user JSONL-backed session store with file locking
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a store over the given log path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Read every parseable session in file (insertion) order.
    ///
    /// Malformed lines are skipped with a warning; a corrupt log degrades
    /// to its parseable subset instead of failing the read.
    fn read_all(&self) -> Result<Vec<Session>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        // Shared lock for reading
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut sessions = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Session>(&line) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed session at line {}: {}",
                        line_num + 1,
                        e
                    );
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} sessions from {:?}", sessions.len(), self.path);
        Ok(sessions)
    }

    /// Replace the whole log atomically: write to a temp file in the same
    /// directory, sync, then rename over the original.
    fn rewrite(&self, sessions: &[Session]) -> Result<()> {
        self.ensure_parent_dir()?;

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "session log path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for session in sessions {
                let line = serde_json::to_string(session)?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl SessionStore for JsonlStore {
    fn save(&mut self, session: &Session) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock while appending
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(session)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended session {} to {:?}", session.id, self.path);
        Ok(())
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<Session>> {
        let mut sessions = self.read_all()?;

        // Reverse first so the stable sort keeps the newest-inserted record
        // first among equal timestamps
        sessions.reverse();
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        if let Some(limit) = limit {
            sessions.truncate(limit);
        }

        Ok(sessions)
    }

    fn delete(&mut self, id: Uuid) -> Result<Option<Session>> {
        let mut sessions = self.read_all()?;

        let Some(pos) = sessions.iter().position(|s| s.id == id) else {
            tracing::debug!("Delete of unknown session {} ignored", id);
            return Ok(None);
        };

        let removed = sessions.remove(pos);
        self.rewrite(&sessions)?;

        tracing::debug!("Deleted session {}", id);
        Ok(Some(removed))
    }
}
