//! Navigator CLI - Command-line interface for the NWEA Goal Navigator
//!
//! This CLI provides a `navigator` command that turns MAP Growth results into
//! learning plans, interactively or from a student data file.

mod commands;
mod prompt;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, reload};

use commands::{assistant, auto, interactive, plan};
use navigator_core::NavigatorConfig;

/// Navigator CLI - learning plans from NWEA MAP Growth data
///
/// Matches a student's RIT score against the Khan Academy reference tables
/// for their grade band and renders a learning plan.
#[derive(Parser, Debug)]
#[command(
    name = "navigator",
    author,
    version,
    about = "NWEA Goal Navigator - learning plans from MAP Growth results"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file (replaces ~/.navigator/config.toml and ./.navigatorrc)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the reference tables
    #[arg(short, long, global = true)]
    reference_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a plan from answers typed at the prompt
    ///
    /// Runs the manager agent, which delegates to the planner agent through
    /// its build_plan capability.
    Interactive {
        /// Append web search snippets to the plan
        #[arg(long)]
        snippets: bool,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build plans from the student data file without prompting
    Auto {
        /// Student data file (defaults to student_data.json)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Render a plan for every record of a student data file
    Plan {
        /// Student data file (defaults to student_data.json)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Append web search snippets to each plan
        #[arg(long)]
        snippets: bool,

        /// Write the plans to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the hosted assistant to draft a plan for every record
    Assistant {
        /// Student data file (defaults to student_data.json)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn parse_level(level: &str) -> LevelFilter {
    match level {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing before configuration discovery so its logs are kept.
    // A level from the config file is applied once the file has been read.
    let (filter, filter_handle) =
        reload::Layer::new(args.log_level.as_deref().map_or(LevelFilter::INFO, parse_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time().with_target(false))
        .try_init()?;

    let mut config = NavigatorConfig::resolve(args.config.as_deref())?;
    if let Some(dir) = args.reference_dir {
        config.reference_dir = Some(dir);
    }
    if args.log_level.is_none()
        && let Some(level) = config.log_level.as_deref()
    {
        filter_handle.reload(parse_level(level))?;
    }

    // If no command provided, show help
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Interactive { snippets, output } => {
            interactive::execute(&config, snippets, output.as_deref()).await?;
        }
        Command::Auto { data } => {
            auto::execute(&config, data).await?;
        }
        Command::Plan { data, snippets, output } => {
            plan::execute(&config, data, snippets, output.as_deref()).await?;
        }
        Command::Assistant { data } => {
            assistant::execute(&config, data).await?;
        }
    }

    Ok(())
}
