//! Action catalog: costs, stat deltas and probabilistic bonuses.
//!
//! Every action is a pure computation over a single uniform draw. The
//! session applies the resulting deltas and spends the time; nothing in
//! here touches player or clock state.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CALL_STUDY_TIPS_CHANCE, NEW_DAY_TEXT, REST_REJUVENATION_CHANCE, STUDY_BREAKTHROUGH_CHANCE,
};
use crate::stats::{StatDelta, StatName};

/// Deltas produced by a single action; never more than four stats.
pub type DeltaSet = SmallVec<[StatDelta; 4]>;

const TARGET_PLACEHOLDER: &str = "{target}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Study,
    Rest,
    Eat,
    Call,
    Meet,
    Exercise,
    Sleep,
}

impl ActionKind {
    pub const ALL: [Self; 7] = [
        Self::Study,
        Self::Rest,
        Self::Eat,
        Self::Call,
        Self::Meet,
        Self::Exercise,
        Self::Sleep,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Rest => "rest",
            Self::Eat => "eat",
            Self::Call => "call",
            Self::Meet => "meet",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
        }
    }

    #[must_use]
    pub fn definition(self) -> &'static ActionDefinition {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// Time an action takes out of the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCost {
    Points(u8),
    /// Closes the day outright, whatever points remain.
    EndsDay,
}

/// What the tokens after the command name mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRule {
    None,
    /// Every remaining token, joined by single spaces.
    Subject,
    /// First remaining token only, with its first character upper-cased.
    Friend,
}

impl ArgumentRule {
    /// Turn raw argument tokens into the action target, `None` when missing.
    #[must_use]
    pub fn normalize(self, args: &[&str]) -> Option<String> {
        match self {
            Self::None => None,
            Self::Subject => (!args.is_empty()).then(|| args.join(" ")),
            Self::Friend => args.first().map(|name| capitalize_first(name)),
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::None)
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where bonus deltas show up in the response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusPlacement {
    /// Merged into the headline numbers.
    Folded,
    /// Listed after the bonus message.
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusRule {
    pub probability: f64,
    pub extra: &'static [StatDelta],
    pub recovery: bool,
    /// May contain `{target}`.
    pub message: &'static str,
    pub placement: BonusPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionDefinition {
    pub kind: ActionKind,
    pub cost: ActionCost,
    pub argument: ArgumentRule,
    pub base: &'static [StatDelta],
    pub bonus: Option<BonusRule>,
    /// Opening sentence; may contain `{target}`.
    pub opening: &'static str,
    pub closing: Option<&'static str>,
    pub usage: &'static str,
    pub example: Option<&'static str>,
    pub summary: &'static str,
}

/// Indexed by `ActionKind as usize`.
pub static CATALOG: [ActionDefinition; 7] = [
    ActionDefinition {
        kind: ActionKind::Study,
        cost: ActionCost::Points(1),
        argument: ArgumentRule::Subject,
        base: &[
            StatDelta::new(StatName::AcademicReadiness, 15),
            StatDelta::new(StatName::MentalHealth, -10),
            StatDelta::new(StatName::Energy, -10),
        ],
        bonus: Some(BonusRule {
            probability: STUDY_BREAKTHROUGH_CHANCE,
            extra: &[StatDelta::new(StatName::AcademicReadiness, 5)],
            recovery: false,
            message: "Breakthrough! You had a moment of clarity that boosted your understanding.",
            placement: BonusPlacement::Folded,
        }),
        opening: "You spend time studying {target}.",
        closing: None,
        usage: "study [subject]",
        example: Some("Please specify a subject to study. Example: 'study math'"),
        summary: "Uses 1 action, +15 Academic, -10 Mental, -10 Energy",
    },
    ActionDefinition {
        kind: ActionKind::Rest,
        cost: ActionCost::Points(1),
        argument: ArgumentRule::None,
        base: &[
            StatDelta::new(StatName::Energy, 15),
            StatDelta::new(StatName::MentalHealth, 5),
        ],
        bonus: Some(BonusRule {
            probability: REST_REJUVENATION_CHANCE,
            extra: &[],
            recovery: true,
            message: "Rejuvenation! You feel completely refreshed.",
            placement: BonusPlacement::Folded,
        }),
        opening: "You take some time to rest and recharge.",
        closing: None,
        usage: "rest",
        example: None,
        summary: "Uses 1 action, +15 Energy, +5 Mental",
    },
    ActionDefinition {
        kind: ActionKind::Eat,
        cost: ActionCost::Points(1),
        argument: ArgumentRule::None,
        base: &[
            StatDelta::new(StatName::Energy, 10),
            StatDelta::new(StatName::MentalHealth, 5),
        ],
        bonus: None,
        opening: "You take time to eat a meal.",
        closing: None,
        usage: "eat",
        example: None,
        summary: "Uses 1 action, +10 Energy, +5 Mental",
    },
    ActionDefinition {
        kind: ActionKind::Call,
        cost: ActionCost::Points(1),
        argument: ArgumentRule::Friend,
        base: &[
            StatDelta::new(StatName::SocialConnections, 15),
            StatDelta::new(StatName::MentalHealth, 5),
            StatDelta::new(StatName::Energy, -5),
        ],
        bonus: Some(BonusRule {
            probability: CALL_STUDY_TIPS_CHANCE,
            extra: &[StatDelta::new(StatName::AcademicReadiness, 5)],
            recovery: false,
            message: "{target} shares some helpful study tips!",
            placement: BonusPlacement::Trailing,
        }),
        opening: "You call {target} and chat for a while.",
        closing: None,
        usage: "call [friend]",
        example: Some("Please specify who to call. Example: 'call alex'"),
        summary: "Uses 1 action, +15 Social, +5 Mental, -5 Energy",
    },
    ActionDefinition {
        kind: ActionKind::Meet,
        cost: ActionCost::Points(2),
        argument: ArgumentRule::Friend,
        base: &[
            StatDelta::new(StatName::SocialConnections, 20),
            StatDelta::new(StatName::MentalHealth, 10),
            StatDelta::new(StatName::Energy, -10),
        ],
        bonus: None,
        opening: "You meet up with {target}.",
        closing: None,
        usage: "meet [friend]",
        example: Some("Please specify who to meet. Example: 'meet alex'"),
        summary: "Uses 2 actions, +20 Social, +10 Mental, -10 Energy",
    },
    ActionDefinition {
        kind: ActionKind::Exercise,
        cost: ActionCost::Points(1),
        argument: ArgumentRule::None,
        base: &[
            StatDelta::new(StatName::Energy, 10),
            StatDelta::new(StatName::MentalHealth, 5),
            StatDelta::new(StatName::AcademicReadiness, -5),
        ],
        bonus: None,
        opening: "You take time to exercise.",
        closing: None,
        usage: "exercise",
        example: None,
        summary: "Uses 1 action, +10 Energy, +5 Mental, -5 Academic",
    },
    ActionDefinition {
        kind: ActionKind::Sleep,
        cost: ActionCost::EndsDay,
        argument: ArgumentRule::None,
        base: &[
            StatDelta::new(StatName::Energy, 30),
            StatDelta::new(StatName::MentalHealth, 15),
        ],
        bonus: None,
        opening: "You get some sleep.",
        closing: Some(NEW_DAY_TEXT),
        usage: "sleep",
        example: None,
        summary: "Ends current day period, +30 Energy, +15 Mental",
    },
];

/// Result of resolving one action against one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub target: Option<String>,
    /// Everything that gets applied, base order first.
    pub deltas: DeltaSet,
    pub special_effect: Option<String>,
    pub recovery: bool,
    /// Player-facing response line(s).
    pub text: String,
}

/// Resolve `kind` for `target`, drawing once from `rng` if it carries a bonus.
pub fn resolve_action<R>(kind: ActionKind, target: Option<&str>, rng: &mut R) -> ActionOutcome
where
    R: Rng + ?Sized,
{
    let def = kind.definition();
    let triggered = def
        .bonus
        .filter(|bonus| rng.r#gen::<f64>() < bonus.probability);
    build_outcome(def, target, triggered)
}

fn build_outcome(
    def: &ActionDefinition,
    target: Option<&str>,
    bonus: Option<BonusRule>,
) -> ActionOutcome {
    let target_text = target.unwrap_or_default();
    let mut deltas: DeltaSet = def.base.iter().copied().collect();
    if let Some(bonus) = bonus {
        merge_deltas(&mut deltas, bonus.extra);
    }

    let headline: &[StatDelta] = match bonus {
        Some(BonusRule {
            placement: BonusPlacement::Trailing,
            ..
        }) => def.base,
        _ => deltas.as_slice(),
    };
    let mut text = format!(
        "{} {}.",
        def.opening.replace(TARGET_PLACEHOLDER, target_text),
        join_deltas(headline)
    );

    let special_effect =
        bonus.map(|bonus| bonus.message.replace(TARGET_PLACEHOLDER, target_text));
    if let (Some(bonus), Some(message)) = (bonus, special_effect.as_deref()) {
        text.push('\n');
        text.push_str(message);
        if bonus.placement == BonusPlacement::Trailing && !bonus.extra.is_empty() {
            text.push(' ');
            text.push_str(&join_deltas(bonus.extra));
            text.push('.');
        }
    }
    if let Some(closing) = def.closing {
        text.push_str("\n\n");
        text.push_str(closing);
    }

    ActionOutcome {
        kind: def.kind,
        target: target.map(str::to_string),
        deltas,
        special_effect,
        recovery: bonus.is_some_and(|bonus| bonus.recovery),
        text,
    }
}

fn merge_deltas(deltas: &mut DeltaSet, extra: &[StatDelta]) {
    for add in extra {
        match deltas.iter_mut().find(|delta| delta.stat == add.stat) {
            Some(existing) => existing.amount += add.amount,
            None => deltas.push(*add),
        }
    }
}

/// `Energy +10, Mental Health +5` in the order given.
#[must_use]
pub fn join_deltas(deltas: &[StatDelta]) -> String {
    deltas
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
