//! Audio cue abstraction for the timers.
//!
//! Cues are fire-and-forget: an implementation must never fail the calling
//! state machine, so playback errors are swallowed at this boundary.

use std::io::Write;

/// Collaborator that plays the countdown and phase-completion cues
pub trait CuePlayer {
    /// Short cue, played on each of the final five seconds of a countdown
    fn play_beep(&self);

    /// Played when a phase fully elapses; never on manual termination
    fn play_complete(&self);
}

/// Terminal bell cues. Write errors are ignored.
pub struct TerminalCues;

impl CuePlayer for TerminalCues {
    fn play_beep(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }

    fn play_complete(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07\x07");
        let _ = stdout.flush();
    }
}

/// No-op cues for quiet environments
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play_beep(&self) {}

    fn play_complete(&self) {}
}
