#![forbid(unsafe_code)]

//! Core domain model and business logic for the Mindful habit tracker.
//!
//! This crate provides:
//! - Domain types (sessions, drafts, daily stats)
//! - Session store backends (single-user JSONL, user-scoped)
//! - Derived statistics (daily aggregation, streak)
//! - Meditation and journaling timer state machines
//! - Configuration, audio cues, CSV export, message catalog

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod i18n;
pub mod store;
pub mod scoped;
pub mod stats;
pub mod aggregator;
pub mod cue;
pub mod meditation;
pub mod journaling;
pub mod export;

// Re-export commonly used types
pub use aggregator::Aggregator;
pub use config::Config;
pub use cue::{CuePlayer, SilentCues, TerminalCues};
pub use error::{Error, Result};
pub use export::export_sessions;
pub use i18n::{tr, Language};
pub use journaling::{JournalPhase, JournalingState, JournalingTick, JournalingTimer, PAGE_COUNT};
pub use meditation::{MeditationState, MeditationTick, MeditationTimer};
pub use scoped::ScopedStore;
pub use store::{JsonlStore, SessionStore};
pub use types::*;
