//! Journaling timer state machine: ten writing pages with breaks between.
//!
//! Unlike meditation, the duration credit is measured elapsed time, so an
//! early end still records the time actually spent. The final page has no
//! trailing break.

use crate::{CuePlayer, Error, Result, SessionDraft, SessionType};

/// Number of writing pages in a full run
pub const PAGE_COUNT: u32 = 10;

/// Sub-state within an active run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalPhase {
    Writing,
    Break,
}

/// Externally observable machine state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalingState {
    Idle,
    Active {
        phase: JournalPhase,
        page: u32,
        remaining_seconds: u32,
    },
}

/// Result of advancing the machine by one second
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalingTick {
    /// Machine is idle; nothing advanced
    Idle,
    Active {
        phase: JournalPhase,
        page: u32,
        remaining_seconds: u32,
    },
    /// Final page elapsed; the run is credited at its measured length
    Finished(SessionDraft),
}

/// Drives one journaling run across all pages
pub struct JournalingTimer {
    page_seconds: u32,
    break_seconds: u32,
    state: JournalingState,
    elapsed_seconds: u32,
}

impl JournalingTimer {
    /// Create an idle timer with the configured phase durations
    pub fn new(page_seconds: u32, break_seconds: u32) -> Self {
        Self {
            page_seconds,
            break_seconds,
            state: JournalingState::Idle,
            elapsed_seconds: 0,
        }
    }

    pub fn state(&self) -> JournalingState {
        self.state
    }

    /// Seconds elapsed since start, counting writing and break time alike
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Begin writing page 1. Only valid from `Idle`.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            JournalingState::Idle => {
                self.elapsed_seconds = 0;
                self.state = JournalingState::Active {
                    phase: JournalPhase::Writing,
                    page: 1,
                    remaining_seconds: self.page_seconds,
                };
                tracing::debug!(
                    "Journaling started: {} pages of {} s, {} s breaks",
                    PAGE_COUNT,
                    self.page_seconds,
                    self.break_seconds
                );
                Ok(())
            }
            _ => Err(Error::State("journaling timer already running".into())),
        }
    }

    /// Advance the active phase by one second
    pub fn tick(&mut self, cues: &dyn CuePlayer) -> JournalingTick {
        let JournalingState::Active {
            phase,
            page,
            remaining_seconds,
        } = self.state
        else {
            return JournalingTick::Idle;
        };

        self.elapsed_seconds += 1;
        let remaining = remaining_seconds.saturating_sub(1);

        if remaining > 0 {
            if remaining <= 5 {
                cues.play_beep();
            }
            self.state = JournalingState::Active {
                phase,
                page,
                remaining_seconds: remaining,
            };
            return JournalingTick::Active {
                phase,
                page,
                remaining_seconds: remaining,
            };
        }

        // Phase fully elapsed
        cues.play_complete();
        match phase {
            JournalPhase::Writing if page < PAGE_COUNT => {
                self.state = JournalingState::Active {
                    phase: JournalPhase::Break,
                    page,
                    remaining_seconds: self.break_seconds,
                };
                JournalingTick::Active {
                    phase: JournalPhase::Break,
                    page,
                    remaining_seconds: self.break_seconds,
                }
            }
            // The last page ends the run directly, no trailing break
            JournalPhase::Writing => JournalingTick::Finished(self.finish()),
            JournalPhase::Break => {
                self.state = JournalingState::Active {
                    phase: JournalPhase::Writing,
                    page: page + 1,
                    remaining_seconds: self.page_seconds,
                };
                JournalingTick::Active {
                    phase: JournalPhase::Writing,
                    page: page + 1,
                    remaining_seconds: self.page_seconds,
                }
            }
        }
    }

    /// End the run early, crediting the elapsed time (partial credit).
    ///
    /// The caller is responsible for having confirmed with the user. Plays
    /// no completion cue. Returns `None` when the machine is idle.
    pub fn end(&mut self) -> Option<SessionDraft> {
        match self.state {
            JournalingState::Idle => None,
            JournalingState::Active { .. } => Some(self.finish()),
        }
    }

    fn finish(&mut self) -> SessionDraft {
        let draft = SessionDraft {
            session_type: SessionType::Journaling,
            duration_seconds: self.elapsed_seconds,
        };
        self.state = JournalingState::Idle;
        tracing::debug!(
            "Journaling finished after {} seconds",
            draft.duration_seconds
        );
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::testing::RecordingCues;
    use crate::SilentCues;

    fn writing(page: u32, remaining_seconds: u32) -> JournalingState {
        JournalingState::Active {
            phase: JournalPhase::Writing,
            page,
            remaining_seconds,
        }
    }

    #[test]
    fn test_writing_transitions_to_break() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        for _ in 0..59 {
            timer.tick(&SilentCues);
        }
        assert_eq!(timer.state(), writing(1, 1));

        let tick = timer.tick(&SilentCues);
        assert_eq!(
            tick,
            JournalingTick::Active {
                phase: JournalPhase::Break,
                page: 1,
                remaining_seconds: 10,
            }
        );
    }

    #[test]
    fn test_break_transitions_to_next_page() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        // Page 1 plus its break
        for _ in 0..70 {
            timer.tick(&SilentCues);
        }
        assert_eq!(timer.state(), writing(2, 60));
    }

    #[test]
    fn test_full_run_credits_measured_elapsed_time() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        let mut finished = None;
        for _ in 0..10_000 {
            if let JournalingTick::Finished(draft) = timer.tick(&SilentCues) {
                finished = Some(draft);
                break;
            }
        }

        // 10 pages of 60 s plus 9 breaks of 10 s
        let draft = finished.expect("run never finished");
        assert_eq!(draft.session_type, SessionType::Journaling);
        assert_eq!(draft.duration_seconds, 690);
        assert_eq!(timer.elapsed_seconds(), 690);
        assert_eq!(timer.state(), JournalingState::Idle);
    }

    #[test]
    fn test_final_page_has_no_trailing_break() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        // Everything up to one second before the end of page 10
        for _ in 0..689 {
            timer.tick(&SilentCues);
        }
        assert_eq!(timer.state(), writing(10, 1));

        assert!(matches!(
            timer.tick(&SilentCues),
            JournalingTick::Finished(_)
        ));
    }

    #[test]
    fn test_early_end_awards_partial_credit() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        // Two full pages with breaks, then 30 s into page 3
        for _ in 0..170 {
            timer.tick(&SilentCues);
        }
        assert_eq!(timer.state(), writing(3, 30));

        let draft = timer.end().expect("active run should yield a draft");
        assert_eq!(draft.session_type, SessionType::Journaling);
        assert_eq!(draft.duration_seconds, 170);
        assert_eq!(timer.state(), JournalingState::Idle);
    }

    #[test]
    fn test_end_while_idle_yields_nothing() {
        let mut timer = JournalingTimer::new(60, 10);
        assert!(timer.end().is_none());
    }

    #[test]
    fn test_start_while_active_is_rejected() {
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();
        assert!(matches!(timer.start(), Err(Error::State(_))));
    }

    #[test]
    fn test_phase_cues() {
        let cues = RecordingCues::default();
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        // First page: beeps at 5..1, completion cue at the phase boundary
        for _ in 0..60 {
            timer.tick(&cues);
        }
        assert_eq!(cues.count("beep"), 5);
        assert_eq!(cues.count("complete"), 1);

        // Break of 10 s: five more beeps, one more completion cue
        for _ in 0..10 {
            timer.tick(&cues);
        }
        assert_eq!(cues.count("beep"), 10);
        assert_eq!(cues.count("complete"), 2);
    }

    #[test]
    fn test_manual_end_plays_no_completion_cue() {
        let cues = RecordingCues::default();
        let mut timer = JournalingTimer::new(60, 10);
        timer.start().unwrap();

        for _ in 0..10 {
            timer.tick(&cues);
        }
        let before = cues.count("complete");
        timer.end().unwrap();

        assert_eq!(cues.count("complete"), before);
    }
}
