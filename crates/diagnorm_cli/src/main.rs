//! Diagnorm CLI: normalizes smart-contract compiler output from the shell.
//!
//! Provides `diagnorm normalize` for turning compiler responses (JSON
//! payloads or raw stdout/stderr text) into deduplicated diagnostics, and
//! `diagnorm rules` for listing the suggestion rules.

#![warn(missing_docs)]

mod normalize;
mod pipeline;
mod rules;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Diagnorm: compiler diagnostics, normalized.
#[derive(Parser, Debug)]
#[command(name = "diagnorm", version, about = "Smart-contract diagnostic normalizer")]
pub struct Cli {
    /// Suppress all output except errors and summaries.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `diagnorm.toml` file or the directory holding it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize one or more compiler responses.
    Normalize(NormalizeArgs),
    /// List the suggestion rules and whether they are enabled.
    Rules,
}

/// Arguments for the `diagnorm normalize` subcommand.
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Compiler response files; `-` reads standard input (the default).
    pub inputs: Vec<String>,

    /// Output format for the collections.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Source file to attribute location-less diagnostics to.
    #[arg(long)]
    pub file: Option<String>,

    /// Show the original compiler text under each diagnostic.
    #[arg(long)]
    pub verbose_text: bool,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Collection output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => stdout_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    pipeline::init_tracing(&global);

    let result = match cli.command {
        Command::Normalize(ref args) => normalize::run(args, &global),
        Command::Rules => rules::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

fn stdout_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
