//! Bounded player stats and the low-water history used by the endings.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    START_ACADEMIC_READINESS, START_ENERGY, START_MENTAL_HEALTH, START_SOCIAL_CONNECTIONS,
    STAT_MAX, STAT_MIN,
};

/// Errors raised when a stat is addressed by a name outside the closed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("unknown stat '{0}'")]
    UnknownStat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatName {
    MentalHealth,
    Energy,
    SocialConnections,
    AcademicReadiness,
}

impl StatName {
    /// Display and iteration order for every stat listing.
    pub const ALL: [Self; 4] = [
        Self::MentalHealth,
        Self::Energy,
        Self::SocialConnections,
        Self::AcademicReadiness,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MentalHealth => "mental_health",
            Self::Energy => "energy",
            Self::SocialConnections => "social_connections",
            Self::AcademicReadiness => "academic_readiness",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MentalHealth => "Mental Health",
            Self::Energy => "Energy",
            Self::SocialConnections => "Social Connections",
            Self::AcademicReadiness => "Academic Readiness",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatName {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mental_health" | "mental" => Ok(Self::MentalHealth),
            "energy" => Ok(Self::Energy),
            "social_connections" | "social" => Ok(Self::SocialConnections),
            "academic_readiness" | "academic" => Ok(Self::AcademicReadiness),
            _ => Err(StatError::UnknownStat(s.to_string())),
        }
    }
}

/// One value per stat, addressed by [`StatName`]. Missing fields
/// deserialize to the starting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub mental_health: i32,
    pub energy: i32,
    pub social_connections: i32,
    pub academic_readiness: i32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            mental_health: START_MENTAL_HEALTH,
            energy: START_ENERGY,
            social_connections: START_SOCIAL_CONNECTIONS,
            academic_readiness: START_ACADEMIC_READINESS,
        }
    }
}

impl StatBlock {
    #[must_use]
    pub const fn new(mental_health: i32, energy: i32, social: i32, academic: i32) -> Self {
        Self {
            mental_health,
            energy,
            social_connections: social,
            academic_readiness: academic,
        }
    }

    #[must_use]
    pub const fn get(&self, stat: StatName) -> i32 {
        match stat {
            StatName::MentalHealth => self.mental_health,
            StatName::Energy => self.energy,
            StatName::SocialConnections => self.social_connections,
            StatName::AcademicReadiness => self.academic_readiness,
        }
    }

    pub const fn get_mut(&mut self, stat: StatName) -> &mut i32 {
        match stat {
            StatName::MentalHealth => &mut self.mental_health,
            StatName::Energy => &mut self.energy,
            StatName::SocialConnections => &mut self.social_connections,
            StatName::AcademicReadiness => &mut self.academic_readiness,
        }
    }

    /// Iterate `(stat, value)` pairs in [`StatName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StatName, i32)> + '_ {
        StatName::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }

    #[must_use]
    pub fn all_within_bounds(&self) -> bool {
        self.iter()
            .all(|(_, value)| (STAT_MIN..=STAT_MAX).contains(&value))
    }

    /// Plain-text listing used by `status` and the final screen.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::from("CURRENT STATS:\n");
        for (stat, value) in self.iter() {
            out.push_str(&format!("- {}: {value}/{STAT_MAX}\n", stat.label()));
        }
        out
    }
}

/// A signed adjustment to a single stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    pub stat: StatName,
    pub amount: i32,
}

impl StatDelta {
    #[must_use]
    pub const fn new(stat: StatName, amount: i32) -> Self {
        Self { stat, amount }
    }
}

impl fmt::Display for StatDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.stat.label(), self.amount)
    }
}

/// Owns the four bounded stats plus the deepest dip each one has taken.
///
/// `lowest` is only touched by negative deltas and records the unclamped
/// post-delta value, so it can sit below zero even though the live value
/// never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTracker {
    current: StatBlock,
    lowest: StatBlock,
}

impl Default for StatTracker {
    fn default() -> Self {
        Self::new(StatBlock::default())
    }
}

impl StatTracker {
    #[must_use]
    pub fn new(start: StatBlock) -> Self {
        let mut current = start;
        for stat in StatName::ALL {
            let value = current.get_mut(stat);
            *value = (*value).clamp(STAT_MIN, STAT_MAX);
        }
        Self {
            current,
            lowest: current,
        }
    }

    /// Apply `delta` to `stat`, returning the clamped new value.
    pub fn apply_delta(&mut self, stat: StatName, delta: i32) -> i32 {
        let before = self.current.get(stat);
        let unclamped = before.saturating_add(delta);
        if delta < 0 {
            let lowest = self.lowest.get_mut(stat);
            *lowest = (*lowest).min(unclamped);
        }
        let value = unclamped.clamp(STAT_MIN, STAT_MAX);
        *self.current.get_mut(stat) = value;
        log::trace!("{} {delta:+} -> {value}", stat.key());
        value
    }

    /// Apply a delta to a stat addressed by name.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownStat`] when `name` is not one of the four
    /// stats; nothing is mutated in that case.
    pub fn apply_named(&mut self, name: &str, delta: i32) -> Result<i32, StatError> {
        let stat = name.parse::<StatName>()?;
        Ok(self.apply_delta(stat, delta))
    }

    pub fn apply(&mut self, delta: StatDelta) -> i32 {
        self.apply_delta(delta.stat, delta.amount)
    }

    #[must_use]
    pub const fn get(&self, stat: StatName) -> i32 {
        self.current.get(stat)
    }

    #[must_use]
    pub const fn lowest(&self, stat: StatName) -> i32 {
        self.lowest.get(stat)
    }

    #[must_use]
    pub const fn current(&self) -> &StatBlock {
        &self.current
    }

    #[must_use]
    pub const fn lowest_block(&self) -> &StatBlock {
        &self.lowest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_bounds_and_tracks_unclamped_low() {
        let mut tracker = StatTracker::new(StatBlock::new(50, 50, 50, 50));
        let value = tracker.apply_delta(StatName::Energy, -200);
        assert_eq!(value, 0);
        assert_eq!(tracker.get(StatName::Energy), 0);
        assert!(tracker.lowest(StatName::Energy) <= -150);

        let value = tracker.apply_delta(StatName::Energy, 500);
        assert_eq!(value, STAT_MAX);
        assert!(tracker.current().all_within_bounds());
    }

    #[test]
    fn positive_deltas_never_move_lowest() {
        let mut tracker = StatTracker::default();
        tracker.apply_delta(StatName::MentalHealth, 25);
        assert_eq!(
            tracker.lowest(StatName::MentalHealth),
            START_MENTAL_HEALTH
        );
    }

    #[test]
    fn lowest_is_monotonic_and_ignores_later_recovery() {
        let mut tracker = StatTracker::default();
        tracker.apply_delta(StatName::AcademicReadiness, -15);
        assert_eq!(tracker.lowest(StatName::AcademicReadiness), 25);
        tracker.apply_delta(StatName::AcademicReadiness, 60);
        tracker.apply_delta(StatName::AcademicReadiness, -5);
        assert_eq!(tracker.get(StatName::AcademicReadiness), 80);
        assert_eq!(tracker.lowest(StatName::AcademicReadiness), 25);
    }

    #[test]
    fn unknown_stat_name_fails_loudly() {
        let mut tracker = StatTracker::default();
        let before = tracker.clone();
        let err = tracker.apply_named("charisma", 10).unwrap_err();
        assert_eq!(err, StatError::UnknownStat("charisma".to_string()));
        assert_eq!(tracker, before);
        assert_eq!(tracker.apply_named("social", -10), Ok(50));
    }

    #[test]
    fn start_values_are_clamped() {
        let tracker = StatTracker::new(StatBlock::new(120, -4, 60, 40));
        assert_eq!(tracker.get(StatName::MentalHealth), STAT_MAX);
        assert_eq!(tracker.get(StatName::Energy), STAT_MIN);
    }

    #[test]
    fn delta_display_keeps_sign() {
        assert_eq!(
            StatDelta::new(StatName::AcademicReadiness, 15).to_string(),
            "Academic Readiness +15"
        );
        assert_eq!(
            StatDelta::new(StatName::Energy, -10).to_string(),
            "Energy -10"
        );
    }

    #[test]
    fn describe_lists_stats_in_fixed_order() {
        let text = StatBlock::default().describe();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "CURRENT STATS:",
                "- Mental Health: 70/100",
                "- Energy: 80/100",
                "- Social Connections: 60/100",
                "- Academic Readiness: 40/100",
            ]
        );
    }
}
