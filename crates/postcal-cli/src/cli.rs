use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Content calendar scheduling in Indian Standard Time
#[derive(Parser, Debug)]
#[command(name = "postcal", version)]
#[command(about = "Content calendar scheduling in Indian Standard Time")]
pub struct Cli {
    /// TOML config file (falls back to $POSTCAL_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the IST civil time of stored instants
    Civil(CivilArgs),
    /// Compute calendar windows for timestamps
    Window(WindowArgs),
    /// List the day cells of a calendar view
    Grid(GridArgs),
    /// Convert scheduling form input (IST) to a storable instant
    Parse(ParseArgs),
    /// List posts scheduled in a calendar window
    Agenda(AgendaArgs),
    /// Count posts for this month, week and day
    Stats(StatsArgs),
}

impl Commands {
    /// The `--output-format` given on the command line, if any.
    pub fn output_format(&self) -> Option<&str> {
        match self {
            Commands::Civil(args) => args.output_format.as_deref(),
            Commands::Window(args) => args.output_format.as_deref(),
            Commands::Grid(args) => args.output_format.as_deref(),
            Commands::Parse(args) => args.output_format.as_deref(),
            Commands::Agenda(args) => args.output_format.as_deref(),
            Commands::Stats(args) => args.output_format.as_deref(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CivilArgs {
    /// Stored instants (RFC 3339)
    #[arg(required = true)]
    pub instants: Vec<String>,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct WindowArgs {
    /// Window granularity: day, week, month
    #[arg(short = 'g', long, default_value = "day")]
    pub granularity: String,

    /// Input format: rfc3339, epoch_ms, epoch_s
    #[arg(short = 'f', long, default_value = "rfc3339")]
    pub format: String,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Read from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(clap::Args, Debug)]
pub struct GridArgs {
    /// Instant inside the period to show (defaults to now)
    #[arg(long)]
    pub at: Option<String>,

    /// Calendar view: day, week, month
    #[arg(long, default_value = "month")]
    pub view: String,

    /// Instant used to mark today (defaults to the system clock)
    #[arg(long)]
    pub now: Option<String>,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Date as typed, YYYY-MM-DD
    #[arg(long, requires = "time")]
    pub date: Option<String>,

    /// Time as typed, HH:MM
    #[arg(long, requires = "date")]
    pub time: Option<String>,

    /// Combined datetime-local value, YYYY-MM-DDTHH:MM
    #[arg(long, conflicts_with_all = ["date", "time"])]
    pub datetime_local: Option<String>,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AgendaArgs {
    /// JSON file holding an array of posts
    #[arg(long)]
    pub posts: Option<PathBuf>,

    /// Instant inside the period to show (defaults to now)
    #[arg(long)]
    pub at: Option<String>,

    /// Calendar view: day, week, month
    #[arg(long, default_value = "week")]
    pub view: String,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// JSON file holding an array of posts
    #[arg(long)]
    pub posts: Option<PathBuf>,

    /// Reference instant (defaults to the system clock)
    #[arg(long)]
    pub now: Option<String>,

    /// Output format: json, text
    #[arg(long)]
    pub output_format: Option<String>,
}
