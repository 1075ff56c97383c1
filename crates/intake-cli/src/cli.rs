use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use intake_core::VERSION;

/// Intake - log daily calorie intake and chart it
#[derive(Parser)]
#[command(name = "intake")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger file
    #[arg(short, long, global = true, env = "INTAKE_PATH")]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Timezone for displayed dates (IANA name, e.g. "America/Chicago")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Calories to log (prompted for when omitted)
    #[arg(value_name = "CALORIES", allow_negative_numbers = true)]
    pub calories: Option<String>,

    /// Reject input that is not a whole number instead of logging 0
    #[arg(long)]
    pub strict: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Redraw the chart after adding
    #[arg(long)]
    pub chart: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Show only the most recent N records
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `chart` command
#[derive(Args)]
pub struct ChartArgs {
    /// Output the series as JSON
    #[arg(long)]
    pub json: bool,

    /// Plot width in columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Plot height in rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Use ASCII characters only
    #[arg(long)]
    pub ascii: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger and config
    Init(InitArgs),

    /// Log a calorie intake
    Add(AddArgs),

    /// List logged intakes, oldest first
    List(ListArgs),

    /// Draw an area chart of logged intakes
    Chart(ChartArgs),

    /// Check ledger integrity
    Check,

    /// Backup the ledger
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
