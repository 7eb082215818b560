//! End of run summary for the final screen and machine-readable reports.
use serde::{Deserialize, Serialize};

use crate::ending::{Ending, classify};
use crate::player::PlayerState;
use crate::stats::StatBlock;

/// Complete summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub ending: Ending,
    pub headline: String,
    pub epilogue: String,
    pub player_name: String,
    pub final_stats: StatBlock,
    pub lowest_stats: StatBlock,
    pub days_completed: u32,
    pub actions_taken: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// `Your journey has led you to the Eagle ending!`
#[must_use]
pub fn headline(ending: Ending) -> String {
    format!("Your journey has led you to the {ending} ending!")
}

/// Build the summary for `player`, classifying the ending if not supplied.
#[must_use]
pub fn result_summary(
    player: &PlayerState,
    ending: Option<Ending>,
    days_completed: u32,
    seed: Option<u64>,
) -> ResultSummary {
    let ending = ending.unwrap_or_else(|| classify(player));
    ResultSummary {
        ending,
        headline: headline(ending),
        epilogue: ending.epilogue().to_string(),
        player_name: player.name.clone(),
        final_stats: *player.stats.current(),
        lowest_stats: *player.stats.lowest_block(),
        days_completed,
        actions_taken: player.actions_taken(),
        seed,
    }
}
