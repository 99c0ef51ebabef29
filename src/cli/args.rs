//! Command-line arguments and subcommands for the pushdown CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::validators::ValidatorKind;

#[derive(Debug, Parser)]
#[command(
    name = "pushdown",
    version,
    about = "Validate filenames, file signatures, file types and tag nesting with a traced pushdown automaton."
)]
pub struct PushdownArgs {
    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log engine activity to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./pushdown.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a literal input string.
    Check {
        #[arg(value_enum)]
        kind: ValidatorKind,
        input: String,
    },
    /// Validate a file on disk; the input is derived from the file.
    File {
        #[arg(value_enum)]
        kind: ValidatorKind,
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Validate many files in parallel and print statistics.
    Batch {
        #[arg(value_enum)]
        kind: ValidatorKind,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Also write the JSON report to this file.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Print the transition table of a validator.
    Table {
        #[arg(value_enum)]
        kind: ValidatorKind,
    },
    /// List validators with their sample inputs.
    Samples {
        #[arg(value_enum)]
        kind: Option<ValidatorKind>,
    },
    /// Run the YAML suites in a directory.
    Test {
        #[arg(default_value = "tests/suites")]
        path: PathBuf,
        /// Only run cases whose name or validator matches.
        #[arg(long)]
        filter: Option<String>,
    },
}
