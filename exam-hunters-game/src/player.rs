//! Player state: stats, action history and the recovery flag.
use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, ActionOutcome};
use crate::stats::{StatBlock, StatDelta, StatTracker};

/// One logged action. Append-only; read back only for the recovery check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub deltas: Vec<StatDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_effect: Option<String>,
    #[serde(default)]
    pub recovery: bool,
    /// Set when the engine invoked the action on the player's behalf.
    #[serde(default)]
    pub automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub stats: StatTracker,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Ever rejuvenated. Endings read this, not the history.
    #[serde(default)]
    pub recovery_flag_ever_set: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_PLAYER_NAME, StatBlock::default())
    }
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>, start: StatBlock) -> Self {
        Self {
            name: name.into(),
            stats: StatTracker::new(start),
            history: Vec::new(),
            recovery_flag_ever_set: false,
        }
    }

    /// Apply every delta of a resolved action and append it to the history.
    pub fn apply_outcome(&mut self, outcome: &ActionOutcome, automatic: bool) {
        for delta in &outcome.deltas {
            self.stats.apply(*delta);
        }
        if outcome.recovery {
            self.recovery_flag_ever_set = true;
        }
        self.history.push(HistoryEntry {
            action: outcome.kind,
            target: outcome.target.clone(),
            deltas: outcome.deltas.to_vec(),
            special_effect: outcome.special_effect.clone(),
            recovery: outcome.recovery,
            automatic,
        });
    }

    #[must_use]
    pub fn actions_taken(&self) -> usize {
        self.history.len()
    }
}
