//! The pushdown command-line interface.
//!
//! Every subcommand resolves to a [`Verdict`], which `main` turns into the
//! process exit status.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::batch::{self, BatchItem};
use crate::cli::args::{Command, PushdownArgs};
use crate::config::EngineConfig;
use crate::diagnostics::PdaError;
use crate::engine::{self, Report};
use crate::err_msg;
use crate::harness::{self, SuiteConfig};
use crate::probe::{self, FileProbe};
use crate::transitions::transition_table;
use crate::validators::ValidatorKind;

pub mod args;
pub mod output;

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Accepted => 0,
            Verdict::Rejected => 1,
        }
    }

    fn from_bool(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

/// Dispatches the parsed arguments to their subcommand.
pub fn run(args: PushdownArgs) -> Result<Verdict, PdaError> {
    let json = args.json;
    match args.command {
        Command::Check { kind, input } => handle_check(kind, &input, json, args.config.as_deref()),
        Command::File { kind, path } => handle_file(kind, &path, json, args.config.as_deref()),
        Command::Batch {
            kind,
            paths,
            report,
        } => handle_batch(kind, &paths, report.as_deref(), json, args.config.as_deref()),
        Command::Table { kind } => handle_table(kind, json),
        Command::Samples { kind } => handle_samples(kind, json),
        Command::Test { path, filter } => handle_test(path, filter.as_deref()),
    }
}

// ============================================================================
// SUBCOMMAND HANDLERS
// ============================================================================

fn handle_check(
    kind: ValidatorKind,
    input: &str,
    json: bool,
    config: Option<&Path>,
) -> Result<Verdict, PdaError> {
    let config = EngineConfig::load(config)?;
    let outcome = engine::validate(kind, input);
    let report = Report::new(kind, input, &outcome);
    if json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report, &probe::preview(input, &config));
    }
    Ok(Verdict::from_bool(outcome.accepted))
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a FileProbe,
    #[serde(flatten)]
    report: Report<'a>,
}

fn handle_file(
    kind: ValidatorKind,
    path: &Path,
    json: bool,
    config: Option<&Path>,
) -> Result<Verdict, PdaError> {
    let config = EngineConfig::load(config)?;
    let (file, input) = prepare(kind, path, &config)?;

    let outcome = engine::validate(kind, &input);
    let report = Report::new(kind, &input, &outcome);
    if json {
        output::print_json(&FileReport {
            file: &file,
            report,
        })?;
    } else {
        println!("file:      {} ({} bytes)", file.name, file.size);
        output::print_report(&report, &probe::preview(&input, &config));
    }
    Ok(Verdict::from_bool(outcome.accepted))
}

fn handle_batch(
    kind: ValidatorKind,
    paths: &[PathBuf],
    report_path: Option<&Path>,
    json: bool,
    config: Option<&Path>,
) -> Result<Verdict, PdaError> {
    let config = EngineConfig::load(config)?;
    let items: Vec<BatchItem> = paths
        .iter()
        .map(|path| {
            let label = path.display().to_string();
            match prepare(kind, path, &config) {
                Ok((_, input)) => BatchItem::ready(label, input),
                Err(error) => {
                    warn!("{}: {}", label, error);
                    BatchItem::failed(label, error)
                }
            }
        })
        .collect();

    let report = batch::validate_all(kind, items);
    if let Some(path) = report_path {
        output::write_json(path, &report)?;
        info!("wrote batch report to {}", path.display());
    }
    if json {
        output::print_json(&report)?;
    } else {
        output::print_batch(&report);
    }
    Ok(Verdict::from_bool(report.statistics.invalid == 0))
}

fn handle_table(kind: ValidatorKind, json: bool) -> Result<Verdict, PdaError> {
    let table = transition_table(kind);
    if json {
        output::print_json(&table)?;
    } else {
        output::print_transition_table(kind, table);
    }
    Ok(Verdict::Accepted)
}

#[derive(Serialize)]
struct SampleListing {
    validator: ValidatorKind,
    #[serde(flatten)]
    info: crate::catalog::ValidatorInfo,
    samples: &'static [&'static str],
}

fn handle_samples(kind: Option<ValidatorKind>, json: bool) -> Result<Verdict, PdaError> {
    let kinds: Vec<ValidatorKind> = match kind {
        Some(kind) => vec![kind],
        None => ValidatorKind::ALL.to_vec(),
    };
    if json {
        let listing: Vec<SampleListing> = kinds
            .iter()
            .map(|&validator| SampleListing {
                validator,
                info: crate::catalog::info(validator),
                samples: crate::catalog::samples(validator),
            })
            .collect();
        output::print_json(&listing)?;
    } else {
        output::print_samples(&kinds);
    }
    Ok(Verdict::Accepted)
}

fn handle_test(path: PathBuf, filter: Option<&str>) -> Result<Verdict, PdaError> {
    if !path.is_dir() {
        return Err(err_msg!(Input, "{} is not a directory", path.display()));
    }
    let summary = harness::run_all(filter, &SuiteConfig::with_root(path))?;
    Ok(Verdict::from_bool(summary.failed == 0))
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Probes `path`, refuses extensions outside the upload list and derives the
/// input `kind` expects.
fn prepare(
    kind: ValidatorKind,
    path: &Path,
    config: &EngineConfig,
) -> Result<(FileProbe, String), PdaError> {
    let file = FileProbe::open(path, config)?;
    if !file.allowed(config) {
        return Err(err_msg!(
            Input,
            "{}: extension '{}' is not on the upload list",
            file.name,
            file.extension
        ));
    }
    let input = file.prepare_input(kind, config)?;
    Ok((file, input))
}
