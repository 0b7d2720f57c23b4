//! Meditation countdown state machine.
//!
//! A single repeating 1-second tick drives the countdown. Completion
//! credits the configured duration; a manual stop credits nothing. Paused
//! time is simply not ticked, so it never counts against the session.

use crate::{CuePlayer, Error, Result, SessionDraft, SessionType};

/// Externally observable machine state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeditationState {
    Idle,
    Running { remaining_seconds: u32 },
    Paused { remaining_seconds: u32 },
}

/// Result of advancing the machine by one second
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeditationTick {
    /// Machine is idle; nothing advanced
    Idle,
    /// Countdown frozen; nothing advanced
    Paused { remaining_seconds: u32 },
    Running { remaining_seconds: u32 },
    /// Countdown reached zero; the run is credited at the configured length
    Finished(SessionDraft),
}

/// Drives one meditation run from idle through completion
pub struct MeditationTimer {
    minutes: u32,
    state: MeditationState,
}

impl MeditationTimer {
    /// Create an idle timer with the configured duration
    pub fn new(minutes: u32) -> Self {
        Self {
            minutes,
            state: MeditationState::Idle,
        }
    }

    pub fn state(&self) -> MeditationState {
        self.state
    }

    pub fn configured_seconds(&self) -> u32 {
        self.minutes * 60
    }

    /// Begin the countdown. Only valid from `Idle`.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            MeditationState::Idle => {
                self.state = MeditationState::Running {
                    remaining_seconds: self.configured_seconds(),
                };
                tracing::debug!("Meditation started: {} min", self.minutes);
                Ok(())
            }
            _ => Err(Error::State("meditation timer already running".into())),
        }
    }

    /// Freeze the countdown. No-op unless running.
    pub fn pause(&mut self) {
        if let MeditationState::Running { remaining_seconds } = self.state {
            self.state = MeditationState::Paused { remaining_seconds };
            tracing::debug!("Meditation paused at {} s remaining", remaining_seconds);
        }
    }

    /// Resume a paused countdown. No-op unless paused.
    pub fn resume(&mut self) {
        if let MeditationState::Paused { remaining_seconds } = self.state {
            self.state = MeditationState::Running { remaining_seconds };
        }
    }

    /// Abandon the run. No session is credited.
    pub fn stop(&mut self) {
        self.state = MeditationState::Idle;
        tracing::debug!("Meditation stopped without credit");
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self, cues: &dyn CuePlayer) -> MeditationTick {
        match self.state {
            MeditationState::Idle => MeditationTick::Idle,
            MeditationState::Paused { remaining_seconds } => {
                MeditationTick::Paused { remaining_seconds }
            }
            MeditationState::Running { remaining_seconds } => {
                let remaining = remaining_seconds.saturating_sub(1);
                if remaining == 0 {
                    cues.play_complete();
                    self.state = MeditationState::Idle;
                    // Credit is the configured duration, not elapsed wall-clock
                    MeditationTick::Finished(SessionDraft {
                        session_type: SessionType::Meditation,
                        duration_seconds: self.configured_seconds(),
                    })
                } else {
                    if remaining <= 5 {
                        cues.play_beep();
                    }
                    self.state = MeditationState::Running {
                        remaining_seconds: remaining,
                    };
                    MeditationTick::Running {
                        remaining_seconds: remaining,
                    }
                }
            }
        }
    }
}
