//! Scripted narrative beats keyed by day and period.
//!
//! The script is fixed. Choice options carry coarse effect tags in their
//! text (`Social ++`, `Academic -`) which map onto fixed magnitudes through
//! [`CHOICE_EFFECT_RULES`].
use serde::Serialize;
use std::collections::HashSet;

use crate::clock::Period;
use crate::constants::{CHOICE_TAG_MAJOR, CHOICE_TAG_MINOR};
use crate::stats::{StatDelta, StatName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BeatKey {
    pub day: u32,
    pub period: Period,
}

impl BeatKey {
    #[must_use]
    pub const fn new(day: u32, period: Period) -> Self {
        Self { day, period }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatKind {
    Introduction,
    Challenge,
    News,
    Social,
    Final,
    Reflection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Beat {
    pub key: BeatKey,
    pub kind: BeatKind,
    pub text: &'static str,
    pub options: &'static [&'static str],
}

impl Beat {
    #[must_use]
    pub const fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

pub static DEFAULT_SCRIPT: [Beat; 6] = [
    Beat {
        key: BeatKey::new(1, Period::Morning),
        kind: BeatKind::Introduction,
        text: "Welcome to your final exam week! You have 3 days until your exams begin.",
        options: &[],
    },
    Beat {
        key: BeatKey::new(1, Period::Day),
        kind: BeatKind::Challenge,
        text: "Your laptop crashes while working on an assignment!",
        options: &[
            "Take a deep breath and restart",
            "Call tech-savvy friend",
            "Panic and try random solutions",
        ],
    },
    Beat {
        key: BeatKey::new(2, Period::Morning),
        kind: BeatKind::News,
        text: "You receive an email: History exam has been moved up a day!",
        options: &[],
    },
    Beat {
        key: BeatKey::new(2, Period::Day),
        kind: BeatKind::Social,
        text: "Your friend is having a crisis and needs support.",
        options: &[
            "Be there for them (Social ++, Academic --)",
            "Offer brief support (Social +, Academic -)",
            "Focus on studying (Academic +, Social --)",
        ],
    },
    Beat {
        key: BeatKey::new(3, Period::Morning),
        kind: BeatKind::Final,
        text: "This is your last day to prepare for exams!",
        options: &[],
    },
    Beat {
        key: BeatKey::new(3, Period::Day),
        kind: BeatKind::Reflection,
        text: "As the day ends, you reflect on your preparation for tomorrow's exams.",
        options: &[],
    },
];

/// Substring tag and the delta it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceEffectRule {
    pub tag: &'static str,
    pub delta: StatDelta,
}

const fn rule(tag: &'static str, stat: StatName, amount: i32) -> ChoiceEffectRule {
    ChoiceEffectRule {
        tag,
        delta: StatDelta::new(stat, amount),
    }
}

/// Checked top to bottom against the lower-cased option text. Within one
/// stat the first hit wins, so double symbols must precede single ones.
pub const CHOICE_EFFECT_RULES: [ChoiceEffectRule; 8] = [
    rule("academic ++", StatName::AcademicReadiness, CHOICE_TAG_MAJOR),
    rule("academic +", StatName::AcademicReadiness, CHOICE_TAG_MINOR),
    rule("academic --", StatName::AcademicReadiness, -CHOICE_TAG_MAJOR),
    rule("academic -", StatName::AcademicReadiness, -CHOICE_TAG_MINOR),
    rule("social ++", StatName::SocialConnections, CHOICE_TAG_MAJOR),
    rule("social +", StatName::SocialConnections, CHOICE_TAG_MINOR),
    rule("social --", StatName::SocialConnections, -CHOICE_TAG_MAJOR),
    rule("social -", StatName::SocialConnections, -CHOICE_TAG_MINOR),
];

/// Effects encoded in an option's text, at most one per stat.
#[must_use]
pub fn choice_effects(option: &str) -> Vec<StatDelta> {
    let lowered = option.to_lowercase();
    let mut effects: Vec<StatDelta> = Vec::new();
    for rule in &CHOICE_EFFECT_RULES {
        if effects.iter().any(|delta| delta.stat == rule.delta.stat) {
            continue;
        }
        if lowered.contains(rule.tag) {
            effects.push(rule.delta);
        }
    }
    effects
}

/// How a raw answer to a beat's options was interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceResolution {
    Applied {
        option: &'static str,
        effects: Vec<StatDelta>,
    },
    /// Blank answer.
    Skipped,
    /// Not a number in `1..=options.len()`; nothing applies.
    Ignored { input: String },
}

/// Interpret a 1-based answer to `beat`'s options. Does not mutate state.
///
/// The line is taken as typed: padded digits are not a number.
#[must_use]
pub fn resolve_choice(beat: &Beat, answer: &str) -> ChoiceResolution {
    if answer.is_empty() {
        return ChoiceResolution::Skipped;
    }
    let picked = answer
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| answer.parse::<usize>().ok())
        .flatten()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| beat.options.get(idx).copied());
    match picked {
        Some(option) => ChoiceResolution::Applied {
            option,
            effects: choice_effects(option),
        },
        None => ChoiceResolution::Ignored {
            input: answer.to_string(),
        },
    }
}

/// Fires each scripted beat at most once.
#[derive(Debug, Clone)]
pub struct EventEngine {
    script: &'static [Beat],
    fired: HashSet<BeatKey>,
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::new(&DEFAULT_SCRIPT)
    }
}

impl EventEngine {
    #[must_use]
    pub fn new(script: &'static [Beat]) -> Self {
        Self {
            script,
            fired: HashSet::new(),
        }
    }

    /// The beat for `(day, period)` the first time it is asked for, then `None`.
    pub fn fire(&mut self, day: u32, period: Period) -> Option<&'static Beat> {
        let key = BeatKey::new(day, period);
        let beat = self.script.iter().find(|beat| beat.key == key)?;
        if !self.fired.insert(key) {
            log::debug!("beat day{day}.{} already fired", period.key());
            return None;
        }
        log::debug!("firing beat day{day}.{}", period.key());
        Some(beat)
    }

    #[must_use]
    pub fn has_fired(&self, day: u32, period: Period) -> bool {
        self.fired.contains(&BeatKey::new(day, period))
    }

    #[must_use]
    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }
}
