//! Multi-user store decorator with ownership checks.
//!
//! Wraps any backend with an already-resolved user identity: saves stamp the
//! user, listings filter to the user, and deletion refuses ids the user does
//! not own. The refusal is indistinguishable from a missing id, so the
//! existence of other users' records never leaks.

use crate::{Error, Result, Session, SessionStore};
use uuid::Uuid;

/// User-scoped view over a shared session store
pub struct ScopedStore<S> {
    inner: S,
    user: String,
}

impl<S: SessionStore> ScopedStore<S> {
    /// Scope `inner` to the given user. Identity resolution (authentication)
    /// happens elsewhere; this type only enforces ownership.
    pub fn new(inner: S, user: impl Into<String>) -> Self {
        Self {
            inner,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn owns(&self, session: &Session) -> bool {
        session.user.as_deref() == Some(self.user.as_str())
    }
}

impl<S: SessionStore> SessionStore for ScopedStore<S> {
    fn save(&mut self, session: &Session) -> Result<()> {
        let mut stamped = session.clone();
        stamped.user = Some(self.user.clone());
        self.inner.save(&stamped)
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .inner
            .list(None)?
            .into_iter()
            .filter(|s| self.owns(s))
            .collect();

        if let Some(limit) = limit {
            sessions.truncate(limit);
        }

        Ok(sessions)
    }

    fn delete(&mut self, id: Uuid) -> Result<Option<Session>> {
        let owned = self
            .inner
            .list(None)?
            .iter()
            .any(|s| s.id == id && self.owns(s));

        if !owned {
            tracing::debug!("Refused delete of session {} for user {}", id, self.user);
            return Err(Error::NotFound(format!("session {} not found", id)));
        }

        match self.inner.delete(id)? {
            Some(session) => Ok(Some(session)),
            // Record vanished between the ownership check and the delete
            None => Err(Error::NotFound(format!("session {} not found", id))),
        }
    }
}
