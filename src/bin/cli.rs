use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use lab_draw::telemetry::{self, TelemetryError};
use lab_draw::{
    ConfigError, DrawConfig, DrawGenerator, PersistenceError, load_roster_from_csv,
    render_text_table, save_schedule_to_csv, save_schedule_to_json,
};
use polars::prelude::PolarsError;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "lab-draw",
    about = "Draw people for recurring weekly lab tasks from a roster sheet",
    version
)]
struct Cli {
    /// Roster CSV with a category header row above a task header row
    #[arg(long)]
    roster: PathBuf,
    /// First day of the range; snapped back to its Monday (YYYY-MM-DD, default today)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of the range, inclusive (YYYY-MM-DD, default eight weeks after start)
    #[arg(long)]
    end: Option<NaiveDate>,
    /// JSON file with column layout, marker, seed and log level
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,
    /// Text written for tasks nobody is eligible for
    #[arg(long)]
    marker: Option<String>,
    /// Write the schedule as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the schedule as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Skip printing the schedule table
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Persistence(PersistenceError),
    Render(PolarsError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Telemetry(err) => write!(f, "{err}"),
            CliError::Persistence(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "unable to render schedule: {err}"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for CliError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<PersistenceError> for CliError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<PolarsError> for CliError {
    fn from(value: PolarsError) -> Self {
        Self::Render(value)
    }
}

fn resolve_config(cli: &Cli) -> Result<DrawConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => DrawConfig::load(path)?,
        None => DrawConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(marker) = &cli.marker {
        config.no_candidate_marker = marker.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

const DEFAULT_SPAN: Days = Days::new(8 * 7);

/// Missing bounds default to today and eight weeks after the start.
fn resolve_range(cli: &Cli) -> (NaiveDate, NaiveDate) {
    let start = cli.start.unwrap_or_else(|| Local::now().date_naive());
    let end = cli
        .end
        .unwrap_or_else(|| start.checked_add_days(DEFAULT_SPAN).unwrap_or(NaiveDate::MAX));
    (start, end)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    telemetry::init(&config.log_level)?;

    let roster = load_roster_from_csv(&cli.roster, &config.layout)?;
    info!(
        people = roster.len(),
        tasks = roster.tasks().len(),
        path = %cli.roster.display(),
        "roster loaded"
    );

    let mut generator = match config.seed {
        Some(seed) => DrawGenerator::seeded(seed),
        None => DrawGenerator::new(),
    };
    let (start, end) = resolve_range(&cli);
    let schedule = generator.generate(&roster, start, end);
    let marker = config.no_candidate_marker.as_str();

    if !cli.quiet {
        let df = schedule.to_dataframe(marker)?;
        print!("{}", render_text_table(&df));
    }
    println!("{}", schedule.summary().to_cli_summary());

    if let Some(path) = &cli.csv {
        save_schedule_to_csv(&schedule, path, marker)?;
        println!("Schedule written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        save_schedule_to_json(&schedule, path)?;
        println!("Schedule written to {}", path.display());
    }
    Ok(())
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
