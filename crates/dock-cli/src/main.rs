mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dock",
    version,
    about = "Inbound warehouse analytics: hours breakdown, PPA locations and KPI snapshot"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory where dashboard state is kept between runs
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Thresholds file (JSON) overriding the built-in defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Break down labor hours by function group
    Hours {
        /// Pasted hours text, or "-" for stdin. Omit to restore the saved dataset
        input: Option<String>,

        /// Baseline dataset (e.g. a 4-week average) to compare against
        #[arg(short, long, value_name = "FILE")]
        compare: Option<String>,

        /// Classification table: preset name or JSON file (default: hours)
        #[arg(short, long, value_name = "PRESET|FILE")]
        table: Option<String>,

        /// Re-parse saved raw text instead of using saved totals
        #[arg(long)]
        reparse: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Count unique pallets per PPA location group
    Ppa {
        /// PPA export workbook. Omit to restore the saved rows
        input_file: Option<PathBuf>,

        /// Item master JSON for the small-volume analysis
        #[arg(short, long, value_name = "FILE")]
        item_master: Option<PathBuf>,

        /// Classification table: preset name or JSON file (default: ppa)
        #[arg(short, long, value_name = "PRESET|FILE")]
        table: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inbound KPI snapshot from a transaction export and a labor report
    Snapshot {
        /// Transaction export workbook
        #[arg(short, long, value_name = "FILE")]
        transactions: Option<PathBuf>,

        /// Labor-management report text, or "-" for stdin
        #[arg(short, long, value_name = "FILE")]
        labor: Option<String>,

        /// Write a JSON export of the results (file or directory)
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate classification tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
    /// Show or clear saved dashboard state
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// List predefined tables
    List,
    /// Show the groups and labels of a table
    Explain {
        /// Preset name (e.g., "hours")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom table file
    Validate {
        /// Path to JSON table file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// List saved slots
    Show,
    /// Remove saved slots of one dashboard (hours, ppa, snapshot) or all
    Clear {
        dashboard: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::Context::load(cli.config.as_deref(), cli.state_dir).and_then(|ctx| {
        match cli.command {
            Commands::Hours {
                input,
                compare,
                table,
                reparse,
                output,
            } => commands::hours::run(
                &ctx,
                input.as_deref(),
                compare.as_deref(),
                table.as_deref(),
                reparse,
                &output,
            ),
            Commands::Ppa {
                input_file,
                item_master,
                table,
                output,
            } => commands::ppa::run(
                &ctx,
                input_file.as_deref(),
                item_master.as_deref(),
                table.as_deref(),
                &output,
            ),
            Commands::Snapshot {
                transactions,
                labor,
                export,
                output,
            } => commands::snapshot::run(
                &ctx,
                transactions.as_deref(),
                labor.as_deref(),
                export.as_deref(),
                &output,
            ),
            Commands::Tables { action } => match action {
                TablesAction::List => commands::tables::list(),
                TablesAction::Explain { preset } => commands::tables::explain(&preset),
                TablesAction::Schema => commands::tables::schema(),
                TablesAction::Validate { file } => commands::tables::validate(&file),
            },
            Commands::State { action } => match action {
                StateAction::Show => commands::state::show(&ctx),
                StateAction::Clear { dashboard } => {
                    commands::state::clear(&ctx, dashboard.as_deref())
                }
            },
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
