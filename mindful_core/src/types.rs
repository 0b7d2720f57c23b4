//! Core domain types for the Mindful habit tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Session records and the drafts timers emit
//! - Per-day aggregates derived from the session history

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of guided activity a session records
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Meditation,
    Journaling,
}

/// A completed (or manually ended) activity record
///
/// Created exclusively when a timer run finishes; immutable afterwards
/// except for deletion by id. `user` is only set when the record was saved
/// through a user-scoped store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub session_type: SessionType,
    pub duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// What a finished timer run hands to the aggregator
///
/// The aggregator stamps the id and completion timestamp when recording,
/// keeping the state machines clock-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionDraft {
    pub session_type: SessionType,
    pub duration_seconds: u32,
}

/// Aggregate for one calendar date (UTC date portion of `completed_at`)
///
/// Invariants: `meditation_count + journaling_count` equals the number of
/// sessions on that date, and `total_duration_seconds` is the sum of their
/// durations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub meditation_count: u32,
    pub journaling_count: u32,
    pub total_duration_seconds: u32,
}
