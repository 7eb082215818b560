//! Turn loop state machine binding player, clock and event script.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::actions::{ActionCost, ActionKind, resolve_action};
use crate::clock::{GameClock, Period, Rollover};
use crate::command::{Command, help_text, parse_command};
use crate::config::SessionConfig;
use crate::constants::{AUTO_SLEEP_NOTICE, FAREWELL_TEXT};
use crate::ending::{Ending, classify};
use crate::events::{Beat, ChoiceResolution, EventEngine, resolve_choice};
use crate::player::PlayerState;
use crate::result::{ResultSummary, result_summary};
use crate::stats::{StatBlock, StatDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Playing,
    /// The next line answers the pending beat's options.
    AwaitingChoice,
    Ended,
    Quit,
}

impl SessionPhase {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::AwaitingChoice)
    }
}

/// One renderable item produced while handling a line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportEntry {
    Response { text: String },
    Status { stats: StatBlock },
    Notice { text: String },
    PeriodStarted { day: u32, period: Period },
    Beat { beat: Beat },
    ChoiceApplied {
        option: &'static str,
        effects: Vec<StatDelta>,
    },
    GameEnded { ending: Ending },
}

/// Everything a presenter needs to render one turn, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub entries: Vec<ReportEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_choice: Option<Beat>,
    pub phase: SessionPhase,
}

impl TurnReport {
    /// Text of every `Response` entry.
    pub fn responses(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Response { text } => Some(text.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn beats(&self) -> Vec<&Beat> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                ReportEntry::Beat { beat } => Some(beat),
                _ => None,
            })
            .collect()
    }
}

/// Owns all game state for one run. Generic over the bonus-draw source so
/// tests can pin every roll.
#[derive(Debug, Clone)]
pub struct GameSession<R: Rng = ChaCha20Rng> {
    player: PlayerState,
    clock: GameClock,
    events: EventEngine,
    rng: R,
    seed: Option<u64>,
    phase: SessionPhase,
    pending: Option<&'static Beat>,
    ending: Option<Ending>,
    opened: bool,
}

impl GameSession<ChaCha20Rng> {
    /// Seeded session; the same seed and input replay the same run.
    #[must_use]
    pub fn new(config: &SessionConfig, seed: u64) -> Self {
        let mut session = Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed));
        session.seed = Some(seed);
        session
    }
}

impl<R: Rng> GameSession<R> {
    #[must_use]
    pub fn with_rng(config: &SessionConfig, rng: R) -> Self {
        Self {
            player: PlayerState::new(config.player_name.clone(), config.starting),
            clock: GameClock::new(config.total_days, config.actions_per_period),
            events: EventEngine::default(),
            rng,
            seed: None,
            phase: SessionPhase::Playing,
            pending: None,
            ending: None,
            opened: false,
        }
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    #[must_use]
    pub const fn events(&self) -> &EventEngine {
        &self.events
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn pending_choice(&self) -> Option<&'static Beat> {
        self.pending
    }

    /// Open the session: fires the day 1 morning beat. Later calls report
    /// nothing new.
    pub fn begin(&mut self) -> TurnReport {
        let mut entries = Vec::new();
        if !self.opened {
            self.opened = true;
            let (day, period) = (self.clock.day(), self.clock.period());
            self.announce(&mut entries, day, period);
        }
        self.report(entries)
    }

    /// Handle one line of player input.
    ///
    /// While a beat is waiting on a choice the line is its answer; otherwise
    /// it is parsed as a command. Rejected commands cost nothing.
    pub fn submit(&mut self, line: &str) -> TurnReport {
        let mut entries = Vec::new();
        match self.phase {
            SessionPhase::Ended | SessionPhase::Quit => {
                log::debug!("input after session closed: {line:?}");
            }
            SessionPhase::AwaitingChoice => self.answer_choice(&mut entries, line),
            SessionPhase::Playing => match parse_command(line) {
                Ok(command) => self.dispatch(&mut entries, command),
                Err(err) => entries.push(ReportEntry::Response {
                    text: err.to_string(),
                }),
            },
        }
        if self.phase.is_active() && self.clock.is_complete() {
            self.finish(&mut entries);
        }
        self.report(entries)
    }

    /// Summary of a finished run; `None` while playing or after `quit`.
    #[must_use]
    pub fn summary(&self) -> Option<ResultSummary> {
        let ending = self.ending?;
        Some(result_summary(
            &self.player,
            Some(ending),
            self.clock.total_days(),
            self.seed,
        ))
    }

    #[must_use]
    pub fn into_player(self) -> PlayerState {
        self.player
    }

    fn report(&self, entries: Vec<ReportEntry>) -> TurnReport {
        TurnReport {
            entries,
            pending_choice: self.pending.copied(),
            phase: self.phase,
        }
    }

    fn dispatch(&mut self, entries: &mut Vec<ReportEntry>, command: Command) {
        match command {
            Command::Act { kind, target } => self.perform(entries, kind, target.as_deref(), false),
            Command::Status => entries.push(ReportEntry::Status {
                stats: *self.player.stats.current(),
            }),
            Command::Time => entries.push(ReportEntry::Response {
                text: self.clock.time_label(),
            }),
            Command::Help => entries.push(ReportEntry::Response { text: help_text() }),
            Command::Quit => {
                log::debug!("player quit on day {}", self.clock.day());
                self.phase = SessionPhase::Quit;
                entries.push(ReportEntry::Response {
                    text: FAREWELL_TEXT.to_string(),
                });
            }
        }
    }

    fn perform(
        &mut self,
        entries: &mut Vec<ReportEntry>,
        kind: ActionKind,
        target: Option<&str>,
        automatic: bool,
    ) {
        let outcome = resolve_action(kind, target, &mut self.rng);
        self.player.apply_outcome(&outcome, automatic);
        entries.push(ReportEntry::Response { text: outcome.text });

        match kind.definition().cost {
            ActionCost::Points(cost) => {
                self.clock.spend(cost);
                self.settle(entries);
            }
            ActionCost::EndsDay => self.close_day(entries),
        }
    }

    /// Roll the clock forward once the current period has no points left.
    fn settle(&mut self, entries: &mut Vec<ReportEntry>) {
        if !self.clock.is_exhausted() {
            return;
        }
        match self.clock.period() {
            Period::Morning => {
                let Rollover::PeriodAdvanced { day } = self.clock.begin_day_period() else {
                    return;
                };
                entries.push(ReportEntry::PeriodStarted {
                    day,
                    period: Period::Day,
                });
                self.announce(entries, day, Period::Day);
            }
            Period::Day => {
                log::debug!("day {} out of actions, sleeping", self.clock.day());
                entries.push(ReportEntry::Notice {
                    text: AUTO_SLEEP_NOTICE.to_string(),
                });
                self.perform(entries, ActionKind::Sleep, None, true);
            }
        }
    }

    fn close_day(&mut self, entries: &mut Vec<ReportEntry>) {
        match self.clock.end_day() {
            Rollover::ScheduleComplete => self.finish(entries),
            Rollover::DayStarted { day } | Rollover::PeriodAdvanced { day } => {
                let period = self.clock.period();
                entries.push(ReportEntry::PeriodStarted { day, period });
                self.announce(entries, day, period);
            }
        }
    }

    fn announce(&mut self, entries: &mut Vec<ReportEntry>, day: u32, period: Period) {
        let Some(beat) = self.events.fire(day, period) else {
            return;
        };
        entries.push(ReportEntry::Beat { beat: *beat });
        if beat.has_options() {
            self.pending = Some(beat);
            self.phase = SessionPhase::AwaitingChoice;
        }
    }

    fn answer_choice(&mut self, entries: &mut Vec<ReportEntry>, line: &str) {
        self.phase = SessionPhase::Playing;
        let Some(beat) = self.pending.take() else {
            return;
        };
        match resolve_choice(beat, line) {
            ChoiceResolution::Applied { option, effects } => {
                for delta in &effects {
                    self.player.stats.apply(*delta);
                }
                entries.push(ReportEntry::ChoiceApplied { option, effects });
            }
            ChoiceResolution::Skipped => {
                log::debug!("choice for day{}.{} skipped", beat.key.day, beat.key.period.key());
            }
            ChoiceResolution::Ignored { input } => {
                log::debug!(
                    "ignoring choice {input:?} for day{}.{}",
                    beat.key.day,
                    beat.key.period.key()
                );
            }
        }
    }

    fn finish(&mut self, entries: &mut Vec<ReportEntry>) {
        if self.ending.is_some() {
            return;
        }
        let ending = classify(&self.player);
        log::debug!("exam week complete: {ending}");
        self.ending = Some(ending);
        self.phase = SessionPhase::Ended;
        self.pending = None;
        entries.push(ReportEntry::GameEnded { ending });
    }
}
