use exam_hunters_game::{
    Ending, GameSession, Period, Presenter, Prompt, ReportEntry, ResultSummary, SessionConfig,
    SessionPhase, StatBlock, StatName, TurnReport, play,
};
use rand::rngs::mock::StepRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Feeds fixed lines and keeps every report for inspection.
struct ScriptedPresenter {
    lines: VecDeque<String>,
    reports: Vec<TurnReport>,
    result: Option<ResultSummary>,
}

impl ScriptedPresenter {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| (*line).to_string()).collect(),
            reports: Vec::new(),
            result: None,
        }
    }

    fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.reports.iter().flat_map(|report| report.entries.iter())
    }
}

impl Presenter for ScriptedPresenter {
    fn show_turn(&mut self, report: &TurnReport) {
        self.reports.push(report.clone());
    }

    fn show_result(&mut self, summary: &ResultSummary) {
        self.result = Some(summary.clone());
    }

    fn read_line(&mut self, _prompt: Prompt) -> Option<String> {
        self.lines.pop_front()
    }
}

fn never_lucky(config: &SessionConfig) -> GameSession<StepRng> {
    GameSession::with_rng(config, StepRng::new(u64::MAX, 0))
}

fn always_lucky(config: &SessionConfig) -> GameSession<StepRng> {
    GameSession::with_rng(config, StepRng::new(0, 0))
}

fn short_config(days: u32, starting: StatBlock) -> SessionConfig {
    SessionConfig {
        total_days: days,
        starting,
        ..SessionConfig::default()
    }
}

#[test]
fn sleeping_through_the_week_ends_as_turtle() {
    let mut presenter = ScriptedPresenter::new(&["sleep", "sleep", "sleep"]);
    let summary = play(&mut never_lucky(&SessionConfig::default()), &mut presenter)
        .expect("schedule completes");

    assert_eq!(summary.ending, Ending::Turtle);
    assert_eq!(summary.final_stats, StatBlock::new(100, 100, 60, 40));
    assert_eq!(summary.headline, "Your journey has led you to the Turtle ending!");
    assert_eq!(presenter.result, Some(summary));

    let periods: Vec<(u32, Period)> = presenter
        .entries()
        .filter_map(|entry| match entry {
            ReportEntry::PeriodStarted { day, period } => Some((*day, *period)),
            _ => None,
        })
        .collect();
    assert_eq!(periods, vec![(2, Period::Morning), (3, Period::Morning)]);

    let beats = presenter
        .entries()
        .filter(|entry| matches!(entry, ReportEntry::Beat { .. }))
        .count();
    assert_eq!(beats, 3, "one morning beat per day");
}

#[test]
fn cramming_every_action_ends_as_eagle() {
    let mut presenter = ScriptedPresenter::new(&[
        "study math",
        "study math",
        "study math",
        "",
        "study history",
        "study history",
        "study history",
        "sleep",
        "sleep",
    ]);
    let summary = play(&mut never_lucky(&SessionConfig::default()), &mut presenter)
        .expect("schedule completes");

    assert_eq!(summary.final_stats, StatBlock::new(55, 100, 60, 100));
    assert_eq!(summary.ending, Ending::Eagle);
    assert_eq!(summary.lowest_stats.mental_health, 10);

    let notices = presenter
        .entries()
        .filter(|entry| matches!(entry, ReportEntry::Notice { .. }))
        .count();
    assert_eq!(notices, 1, "sixth study forces one sleep");
}

#[test]
fn lucky_rest_turns_a_weak_week_into_phoenix() {
    let config = short_config(1, StatBlock::new(20, 20, 20, 20));
    let mut presenter = ScriptedPresenter::new(&["rest", "sleep"]);
    let summary = play(&mut always_lucky(&config), &mut presenter).expect("one day");
    assert_eq!(summary.final_stats, StatBlock::new(40, 65, 20, 20));
    assert_eq!(summary.ending, Ending::Phoenix);

    let mut presenter = ScriptedPresenter::new(&["rest", "sleep"]);
    let summary = play(&mut never_lucky(&config), &mut presenter).expect("one day");
    assert_eq!(summary.ending, Ending::Survivor);
}

#[test]
fn social_beat_choice_moves_stats() {
    let mut session = never_lucky(&SessionConfig::default());
    session.begin();
    session.submit("sleep");
    for _ in 0..3 {
        session.submit("eat");
    }
    let pending = session.pending_choice().expect("day 2 beat has options");
    assert_eq!(pending.key.day, 2);

    let report = session.submit("3");
    assert_eq!(
        session.player().stats.get(StatName::AcademicReadiness),
        45,
        "Academic + applies five"
    );
    assert_eq!(session.player().stats.get(StatName::SocialConnections), 50);
    assert!(matches!(
        report.entries.as_slice(),
        [ReportEntry::ChoiceApplied { option, .. }] if option.starts_with("Focus on studying")
    ));
}

#[test]
fn running_out_of_input_leaves_no_summary() {
    let mut session = never_lucky(&SessionConfig::default());
    let mut presenter = ScriptedPresenter::new(&["study art", "time"]);
    assert!(play(&mut session, &mut presenter).is_none());
    assert_eq!(session.phase(), SessionPhase::Playing);
    assert!(presenter.result.is_none());
    let last = presenter.reports.last().expect("time report");
    assert_eq!(
        last.responses().collect::<Vec<_>>(),
        vec!["Day 1, Morning (2 actions remaining)"]
    );
}

#[test]
fn random_play_keeps_stats_in_bounds() {
    const LINES: [&str; 13] = [
        "study math",
        "rest",
        "eat",
        "call alex",
        "meet sam",
        "exercise",
        "sleep",
        "status",
        "time",
        "help",
        "1",
        "2",
        "",
    ];
    for seed in 0..40_u64 {
        let mut session = GameSession::new(&SessionConfig::default(), seed);
        let mut picker = ChaCha20Rng::seed_from_u64(seed ^ 0xE7A4);
        session.begin();
        let mut lowest = *session.player().stats.lowest_block();
        for _ in 0..500 {
            if !session.phase().is_active() {
                break;
            }
            let line = LINES[picker.gen_range(0..LINES.len())];
            session.submit(line);

            let stats = &session.player().stats;
            assert!(stats.current().all_within_bounds(), "seed {seed}: {line}");
            for stat in StatName::ALL {
                assert!(stats.lowest(stat) <= lowest.get(stat), "seed {seed}");
                assert!(stats.lowest(stat) <= 100);
            }
            lowest = *stats.lowest_block();
        }
        assert_eq!(session.phase(), SessionPhase::Ended, "seed {seed}");
        assert!(session.summary().is_some());
    }
}
