//! Centralized balance and tuning constants for Exam Hunters.

// Stat bounds and starting values -----------------------------------------
pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;
pub const START_MENTAL_HEALTH: i32 = 70;
pub const START_ENERGY: i32 = 80;
pub const START_SOCIAL_CONNECTIONS: i32 = 60;
pub const START_ACADEMIC_READINESS: i32 = 40;

// Schedule -----------------------------------------------------------------
pub const DEFAULT_TOTAL_DAYS: u32 = 3;
pub const DEFAULT_ACTIONS_PER_PERIOD: u8 = 3;
pub const DEFAULT_PLAYER_NAME: &str = "Student";

// Action bonus odds ---------------------------------------------------------
pub const STUDY_BREAKTHROUGH_CHANCE: f64 = 0.20;
pub const REST_REJUVENATION_CHANCE: f64 = 0.10;
pub const CALL_STUDY_TIPS_CHANCE: f64 = 0.30;

// Ending thresholds --------------------------------------------------------
pub const PEARL_ALL_STATS_FLOOR: i32 = 60;
pub const EAGLE_ACADEMIC_FLOOR: i32 = 85;
pub const WOLF_SOCIAL_FLOOR: i32 = 85;
pub const TURTLE_MENTAL_FLOOR: i32 = 75;
pub const TURTLE_ENERGY_FLOOR: i32 = 75;
/// A stat whose recorded low reached this value counts as a collapse.
pub const PHOENIX_LOW_WATERMARK: i32 = 30;
/// ...and counts as recovered once it is back at or above this value.
pub const PHOENIX_RECOVERED_FLOOR: i32 = 70;

// Event choice tags --------------------------------------------------------
pub const CHOICE_TAG_MINOR: i32 = 5;
pub const CHOICE_TAG_MAJOR: i32 = 10;

// Player-facing copy -------------------------------------------------------
pub const GAME_TITLE: &str = "EXAM HUNTERS: SURVIVE THE SEMESTER";
pub const FAREWELL_TEXT: &str = "Thanks for playing Exam Hunters: Survive the Semester!";
pub const AUTO_SLEEP_NOTICE: &str = "You've used all your actions for the day. Time to sleep.";
pub const NEW_DAY_TEXT: &str = "A new day begins.";
