//! Session aggregation: recording, retrieval, derived statistics.
//!
//! The aggregator owns a store backend and derives every history view fresh
//! from it. Recording is best-effort by contract: a persistence failure is
//! logged and swallowed so a finished timer run is never interrupted, while
//! validation failures are surfaced to the caller.

use crate::{stats, DailyStats, Error, Result, Session, SessionDraft, SessionStore};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Owns a user's session history and computes derived views
pub struct Aggregator<S> {
    store: S,
}

impl<S: SessionStore> Aggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a finished timer run.
    ///
    /// Rejects a zero duration before anything reaches the store. Returns
    /// the stamped session even when persistence fails; the failure is only
    /// logged.
    pub fn record(
        &mut self,
        draft: SessionDraft,
        completed_at: DateTime<Utc>,
    ) -> Result<Session> {
        if draft.duration_seconds == 0 {
            return Err(Error::Validation(
                "session duration must be positive".into(),
            ));
        }

        let session = Session {
            id: Uuid::new_v4(),
            session_type: draft.session_type,
            duration_seconds: draft.duration_seconds,
            content: None,
            completed_at,
            user: None,
        };

        if let Err(e) = self.store.save(&session) {
            tracing::warn!("Failed to persist session {}: {}", session.id, e);
        } else {
            tracing::info!(
                "Recorded {:?} session of {} seconds",
                session.session_type,
                session.duration_seconds
            );
        }

        Ok(session)
    }

    /// Session history, newest first; at most `limit` entries when given
    pub fn sessions(&self, limit: Option<usize>) -> Result<Vec<Session>> {
        self.store.list(limit)
    }

    /// Delete a session by id.
    ///
    /// The backend decides what a miss means: the single-user store answers
    /// `Ok(None)`, the scoped store answers `Error::NotFound`.
    pub fn delete(&mut self, id: Uuid) -> Result<Option<Session>> {
        self.store.delete(id)
    }

    /// One aggregate per calendar date with sessions, newest date first
    pub fn daily_stats(&self, limit: Option<usize>) -> Result<Vec<DailyStats>> {
        let sessions = self.store.list(None)?;
        Ok(stats::daily_stats(&sessions, limit))
    }

    /// Consecutive-day streak ending at (or just before) `today`
    pub fn streak(&self, today: NaiveDate) -> Result<u32> {
        let daily = self.daily_stats(None)?;
        Ok(stats::streak(&daily, today))
    }
}
