//! Line-oriented terminal front end.
use colored::Colorize;
use exam_hunters_game::constants::{GAME_TITLE, STAT_MAX};
use exam_hunters_game::{Beat, Presenter, Prompt, ReportEntry, ResultSummary, StatBlock, TurnReport};
use std::io::{self, BufRead, Write};

const WIDTH: usize = 80;
const BAR_CELLS: usize = 50;
const TAGLINE: &str =
    "\"Even under pressure, every decision can bring you closer to the person you're meant to be.\"";
const CLOSING_THANKS: &str = "Thank you for playing Exam Hunters: Survive the Semester!";

/// `Mental Health        [███░░░] 70/100` with a fixed 50-cell bar.
pub fn stat_bar(label: &str, value: i32) -> String {
    let filled = usize::try_from(value.clamp(0, STAT_MAX) / 2)
        .unwrap_or_default()
        .min(BAR_CELLS);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled));
    format!("{label:20} [{bar}] {value}/{STAT_MAX}")
}

/// Plain-text body of the final screen, below the header.
pub fn final_body(summary: &ResultSummary) -> String {
    format!(
        "{}\n\n{}\n\nFinal Stats:\n{}\n{CLOSING_THANKS}\n",
        summary.headline,
        summary.epilogue,
        summary.final_stats.describe()
    )
}

pub fn header_lines(text: &str) -> [String; 3] {
    let rule = "=".repeat(WIDTH);
    [rule.clone(), format!("{text:^WIDTH$}"), rule]
}

/// Renders reports to `out` and reads player lines from `input`.
///
/// I/O failures are kept rather than raised mid-game; call
/// [`TerminalPresenter::finish`] to surface the first one. Lines that are
/// not valid UTF-8 are read lossily and reach the game as typed.
pub struct TerminalPresenter<I, W> {
    input: I,
    out: W,
    echo: bool,
    error: Option<io::Error>,
}

impl<I: BufRead, W: Write> TerminalPresenter<I, W> {
    pub fn new(input: I, out: W) -> Self {
        Self {
            input,
            out,
            echo: false,
            error: None,
        }
    }

    /// Repeat every line read, for scripted input that never hits a tty.
    #[must_use]
    pub fn echo_input(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Opening banner, starting stats and clock.
    pub fn welcome(&mut self, stats: &StatBlock, time_label: &str, total_days: u32) {
        self.line("");
        for line in header_lines(GAME_TITLE) {
            self.line(&line.bright_cyan().bold().to_string());
        }
        self.line("");
        self.line(&TAGLINE.italic().to_string());
        self.line("");
        let unit = if total_days == 1 { "day" } else { "days" };
        self.line(&format!(
            "Welcome to your final exam week! You have {total_days} {unit} until your exams begin."
        ));
        self.line("Your choices will determine not just your grades, but who you become.");
        self.stats_panel(stats);
        self.line(time_label);
        self.line("");
        self.line("Type 'help' for a list of commands.");
    }

    /// Flush and report the first I/O error, if any.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while rendering or reading input.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.error = Some(err);
        }
    }

    fn divider(&mut self) {
        self.line(&"-".repeat(WIDTH));
    }

    fn stats_panel(&mut self, stats: &StatBlock) {
        self.divider();
        self.line(&format!("{:^WIDTH$}", "STATS:"));
        for (stat, value) in stats.iter() {
            self.line(&stat_bar(stat.label(), value));
        }
        self.divider();
    }

    fn beat(&mut self, beat: &Beat) {
        self.line("");
        self.line(&beat.text.yellow().bold().to_string());
        self.line("");
        if beat.has_options() {
            self.line("Options:");
            for (idx, option) in beat.options.iter().enumerate() {
                self.line(&format!("{}. {option}", idx + 1));
            }
        }
    }

    fn entry(&mut self, entry: &ReportEntry) {
        match entry {
            ReportEntry::Response { text } => self.line(text),
            ReportEntry::Status { stats } => {
                self.line(stats.describe().trim_end());
                self.stats_panel(stats);
            }
            ReportEntry::Notice { text } => {
                self.line("");
                self.line(&text.magenta().to_string());
            }
            ReportEntry::PeriodStarted { day, period } => {
                let banner = format!("--- DAY {day} {} ---", period.as_str().to_uppercase());
                self.line("");
                self.line(&banner.cyan().bold().to_string());
            }
            ReportEntry::Beat { beat } => self.beat(beat),
            ReportEntry::ChoiceApplied { option, effects } => {
                self.line("");
                self.line(&format!("You chose: {option}"));
                for effect in effects {
                    self.line(&effect.to_string());
                }
            }
            ReportEntry::GameEnded { ending } => {
                log::debug!("rendered end of game: {ending}");
            }
        }
    }
}

impl<I: BufRead, W: Write> Presenter for TerminalPresenter<I, W> {
    fn show_turn(&mut self, report: &TurnReport) {
        for entry in &report.entries {
            self.entry(entry);
        }
    }

    fn show_result(&mut self, summary: &ResultSummary) {
        self.line("");
        for line in header_lines("EXAM WEEK COMPLETE") {
            self.line(&line.bright_green().bold().to_string());
        }
        self.line("");
        let body = final_body(summary);
        for line in body.lines() {
            self.line(line);
        }
    }

    fn read_line(&mut self, prompt: Prompt) -> Option<String> {
        let prompt_text = match prompt {
            Prompt::Command => "> ",
            Prompt::Choice { .. } => "\nEnter your choice (or press Enter to continue): ",
        };
        if self.error.is_none() {
            let shown = write!(self.out, "{prompt_text}").and_then(|()| self.out.flush());
            if let Err(err) = shown {
                self.error = Some(err);
            }
        }

        let mut buf = Vec::new();
        match self.input.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if self.echo {
                    self.line(&line);
                }
                Some(line)
            }
            Err(err) => {
                log::warn!("failed to read input: {err}");
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        }
    }
}
