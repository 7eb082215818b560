mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exam_hunters_game::{GameSession, ResultSummary, SessionConfig, play};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write, stdout};
use std::path::PathBuf;

use terminal::{TerminalPresenter, final_body, header_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Final screen only
    Console,
    /// Machine-readable run summary
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "exam-hunters", version)]
#[command(about = "Exam Hunters: Survive the Semester - spend three days of actions and see who you become")]
struct Args {
    /// Seed for bonus rolls; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Read player input from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// JSON session config (player name, days, actions, starting stats)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of days
    #[arg(long)]
    days: Option<u32>,

    /// Override the actions per period
    #[arg(long)]
    actions: Option<u8>,

    /// Override the player name
    #[arg(long)]
    name: Option<String>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("session seed {seed}, {} days", config.total_days);
    let mut session = GameSession::new(&config, seed);

    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            run_session(&mut session, BufReader::new(file), stdout().lock(), true)?
        }
        None => run_session(&mut session, io::stdin().lock(), stdout().lock(), false)?,
    };

    write_report(&args, summary.as_ref())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SessionConfig::from_json(&json)
                .with_context(|| format!("invalid session config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(days) = args.days {
        config.total_days = days;
    }
    if let Some(actions) = args.actions {
        config.actions_per_period = actions;
    }
    if let Some(name) = &args.name {
        config.player_name.clone_from(name);
    }
    config.validate().context("invalid session settings")?;
    Ok(config)
}

fn run_session<I: BufRead, W: Write>(
    session: &mut GameSession,
    input: I,
    out: W,
    echo: bool,
) -> Result<Option<ResultSummary>> {
    let mut presenter = TerminalPresenter::new(input, out).echo_input(echo);
    presenter.welcome(
        session.player().stats.current(),
        &session.clock().time_label(),
        session.clock().total_days(),
    );
    let summary = play(session, &mut presenter);
    presenter
        .finish()
        .context("terminal input or output failed")?;
    Ok(summary)
}

fn write_report(args: &Args, summary: Option<&ResultSummary>) -> Result<()> {
    match args.report {
        ReportFormat::Json => {
            let mut output_target = OutputTarget::new(args.output.clone())?;
            serde_json::to_writer_pretty(&mut output_target, &summary)
                .context("failed to encode summary")?;
            writeln!(output_target)?;
            output_target.flush()?;
        }
        ReportFormat::Console => {
            // the final screen already went to stdout
            let Some(path) = &args.output else {
                return Ok(());
            };
            let mut output_target = OutputTarget::new(Some(path.clone()))?;
            match summary {
                Some(summary) => {
                    for line in header_lines("EXAM WEEK COMPLETE") {
                        writeln!(output_target, "{line}")?;
                    }
                    write!(output_target, "{}", final_body(summary))?;
                }
                None => writeln!(output_target, "Exam week not completed.")?,
            }
            output_target.flush()?;
        }
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_hunters_game::{Ending, StatBlock};

    fn base_args() -> Args {
        Args {
            seed: Some(7),
            script: None,
            config: None,
            days: None,
            actions: None,
            name: None,
            report: ReportFormat::Json,
            output: None,
            no_color: true,
            verbose: false,
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "exam-hunters-main-{label}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn args_parse_flags() {
        let args = Args::try_parse_from([
            "exam-hunters",
            "--seed",
            "42",
            "--days",
            "2",
            "--report",
            "json",
            "-v",
        ])
        .expect("valid flags");
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.days, Some(2));
        assert_eq!(args.report, ReportFormat::Json);
        assert!(args.verbose);
        assert!(Args::try_parse_from(["exam-hunters", "--report", "xml"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let path = temp_file("config.json");
        fs::write(&path, r#"{"player_name":"Jo","total_days":5}"#).expect("write config");
        let args = Args {
            config: Some(path.clone()),
            days: Some(2),
            name: Some("Max".to_string()),
            ..base_args()
        };
        let config = load_config(&args).expect("valid config");
        assert_eq!(config.total_days, 2);
        assert_eq!(config.player_name, "Max");
        assert_eq!(config.actions_per_period, 3);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn zero_days_is_rejected() {
        let args = Args {
            days: Some(0),
            ..base_args()
        };
        let err = load_config(&args).expect_err("zero days");
        assert!(format!("{err:#}").contains("total_days"));
    }

    #[test]
    fn json_report_writes_summary() {
        let path = temp_file("report.json");
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let summary = ResultSummary {
            ending: Ending::Wolf,
            headline: "Your journey has led you to the Wolf ending!".to_string(),
            epilogue: Ending::Wolf.epilogue().to_string(),
            player_name: "Student".to_string(),
            final_stats: StatBlock::new(50, 50, 90, 40),
            lowest_stats: StatBlock::default(),
            days_completed: 3,
            actions_taken: 9,
            seed: Some(7),
        };
        write_report(&args, Some(&summary)).expect("report");
        let written: ResultSummary =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(written, summary);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn scripted_session_runs_to_an_ending() {
        colored::control::set_override(false);
        let mut session = GameSession::new(&SessionConfig::default(), 3);
        let mut out = Vec::new();
        let summary = run_session(&mut session, "sleep\nsleep\nsleep\n".as_bytes(), &mut out, true)
            .expect("run");
        assert_eq!(summary.map(|s| s.ending), Some(Ending::Turtle));
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Type 'help' for a list of commands."));
        assert!(text.contains("Day 1, Morning (3 actions remaining)"));
    }
}
