//! Exam Hunters Game Engine
//!
//! Platform-agnostic rules for the Exam Hunters exam-week survival game:
//! bounded stats, the action catalog, the day/period clock, scripted beats
//! and ending selection. Rendering and input live behind [`Presenter`].

pub mod actions;
pub mod clock;
pub mod command;
pub mod config;
pub mod constants;
pub mod ending;
pub mod events;
pub mod player;
pub mod result;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use actions::{ActionKind, ActionOutcome, CATALOG, resolve_action};
pub use clock::{GameClock, Period, Rollover};
pub use command::{Command, CommandError, help_text, parse_command};
pub use config::{ConfigError, SessionConfig};
pub use ending::{Ending, classify};
pub use events::{Beat, BeatKind, ChoiceResolution, EventEngine};
pub use player::{HistoryEntry, PlayerState};
pub use result::{ResultSummary, result_summary};
pub use session::{GameSession, ReportEntry, SessionPhase, TurnReport};
pub use stats::{StatBlock, StatDelta, StatError, StatName, StatTracker};

use rand::Rng;

/// What the session is waiting for when it asks for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Command,
    /// Answer to a beat with this many options; blank skips.
    Choice { options: usize },
}

/// Trait for abstracting rendering and line input.
/// Terminal and scripted front ends provide this.
pub trait Presenter {
    /// Render everything one turn produced, in order.
    fn show_turn(&mut self, report: &TurnReport);

    /// Render the final screen of a completed run.
    fn show_result(&mut self, summary: &ResultSummary);

    /// Read one line of player input; `None` once input is exhausted.
    fn read_line(&mut self, prompt: Prompt) -> Option<String>;
}

/// Drive `session` until the schedule completes, the player quits, or input
/// runs out. Returns the summary only for a completed schedule.
pub fn play<R, P>(session: &mut GameSession<R>, presenter: &mut P) -> Option<ResultSummary>
where
    R: Rng,
    P: Presenter + ?Sized,
{
    let opening = session.begin();
    presenter.show_turn(&opening);

    while session.phase().is_active() {
        let prompt = session
            .pending_choice()
            .map_or(Prompt::Command, |beat| Prompt::Choice {
                options: beat.options.len(),
            });
        let Some(line) = presenter.read_line(prompt) else {
            log::debug!("input closed on day {}", session.clock().day());
            break;
        };
        let report = session.submit(&line);
        presenter.show_turn(&report);
    }

    let summary = session.summary()?;
    presenter.show_result(&summary);
    Some(summary)
}
