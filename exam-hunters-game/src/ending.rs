//! Ending selection over final and lowest-ever stats.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    EAGLE_ACADEMIC_FLOOR, PEARL_ALL_STATS_FLOOR, PHOENIX_LOW_WATERMARK, PHOENIX_RECOVERED_FLOOR,
    TURTLE_ENERGY_FLOOR, TURTLE_MENTAL_FLOOR, WOLF_SOCIAL_FLOOR,
};
use crate::player::PlayerState;
use crate::stats::StatName;

/// Possible endings, in the priority order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// Every stat finished at or above the balance floor.
    Pearl,
    /// Academic readiness finished very high.
    Eagle,
    /// Social connections finished very high.
    Wolf,
    /// Mental health and energy both preserved.
    Turtle,
    /// A stat bottomed out and came back, or a recovery bonus landed.
    Phoenix,
    Survivor,
}

impl Ending {
    pub const ALL: [Self; 6] = [
        Self::Pearl,
        Self::Eagle,
        Self::Wolf,
        Self::Turtle,
        Self::Phoenix,
        Self::Survivor,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pearl => "Pearl",
            Self::Eagle => "Eagle",
            Self::Wolf => "Wolf",
            Self::Turtle => "Turtle",
            Self::Phoenix => "Phoenix",
            Self::Survivor => "Survivor",
        }
    }

    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Pearl => "The Balanced Achiever",
            Self::Eagle => "The High Flyer",
            Self::Wolf => "The Social Leader",
            Self::Turtle => "The Steady Survivor",
            Self::Phoenix => "The Comeback Story",
            Self::Survivor => "The Survivor",
        }
    }

    #[must_use]
    pub const fn epilogue(self) -> &'static str {
        match self {
            Self::Pearl => {
                "Like a pearl formed through pressure but maintaining its luster, you've emerged from exam week with a balanced approach to life. Your grades are solid, your relationships intact, and your wellbeing preserved. You've learned that success isn't just about academic achievement, it's about thriving as a whole person."
            }
            Self::Eagle => {
                "Like an eagle soaring above the clouds, you've reached academic heights that few can match. Your laser focus on studies has paid off with exceptional exam results. While your social connections and mental health took a backseat, you've proven your ability to achieve excellence through dedication and sacrifice."
            }
            Self::Wolf => {
                "Like a wolf who draws strength from the pack, you've prioritized your connections with others. Your exam results may not top the charts, but you've built a network of support that will last far beyond this semester. Your friends recognize you as someone who values people over perfection."
            }
            Self::Turtle => {
                "Like a turtle who knows when to retreat into its shell, you recognized the importance of self-preservation. You paced yourself, protected your wellbeing, and made it through exams without burning out. Your balanced approach may not have maximized every opportunity, but you've learned sustainable success strategies that will serve you for life."
            }
            Self::Phoenix => {
                "Like a phoenix rising from the ashes, you faced moments of near-collapse but found the strength to rebuild. Your journey through exam week wasn't smooth, but your resilience in the face of challenges revealed an inner strength you didn't know you had. This experience has transformed you."
            }
            Self::Survivor => {
                "You made it through exam week. It wasn't pretty, and it wasn't perfect, but you survived. Sometimes that's enough."
            }
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Select the ending by strict priority; the first matching rule wins.
#[must_use]
pub fn classify(player: &PlayerState) -> Ending {
    let stats = &player.stats;
    let current = stats.current();

    let ending = if current.iter().all(|(_, value)| value >= PEARL_ALL_STATS_FLOOR) {
        Ending::Pearl
    } else if current.academic_readiness >= EAGLE_ACADEMIC_FLOOR {
        Ending::Eagle
    } else if current.social_connections >= WOLF_SOCIAL_FLOOR {
        Ending::Wolf
    } else if current.mental_health >= TURTLE_MENTAL_FLOOR && current.energy >= TURTLE_ENERGY_FLOOR
    {
        Ending::Turtle
    } else if made_comeback(player) {
        Ending::Phoenix
    } else {
        Ending::Survivor
    };
    log::debug!("classified ending: {ending}");
    ending
}

fn made_comeback(player: &PlayerState) -> bool {
    let rebounded = StatName::ALL.into_iter().any(|stat| {
        player.stats.lowest(stat) <= PHOENIX_LOW_WATERMARK
            && player.stats.get(stat) >= PHOENIX_RECOVERED_FLOOR
    });
    rebounded || player.recovery_flag_ever_set
}
