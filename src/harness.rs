//! YAML suite runner.
//!
//! Each suite file holds a list of cases; every case is validated on a fresh
//! automaton and compared against its expectations.
//!
//! ```yaml
//! - name: "dot in extension position"
//!   validator: filename
//!   input: "report.final.docx"
//!   accept: false
//!   reason: "more than one dot"   # optional, substring of the terminal step
//!   steps: 9                      # optional, exact trace length
//!   skip: false                   # optional
//!   only: false                   # optional
//! ```
//!
//! When any case in the run is marked `only`, every case without it is
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::diagnostics::{to_error_source, yaml_span, PdaError};
use crate::engine;
use crate::err_ctx;
use crate::validators::ValidatorKind;

// =============================================================================
// CORE TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteCase {
    pub name: String,
    pub validator: ValidatorKind,
    pub input: String,
    pub accept: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub steps: Option<usize>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteResult {
    Pass { file: String, name: String },
    Fail { file: String, name: String, error: String },
    Skipped { file: String, name: String, reason: String },
}

pub struct SuiteConfig {
    pub root: PathBuf,
    pub use_colors: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("tests/suites"),
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

impl SuiteConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

// =============================================================================
// DISCOVERY
// =============================================================================

/// All `.yaml`/`.yml` files under `root`, sorted for a stable run order.
pub fn discover_yaml_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("yaml" | "yml")))
        .collect();
    files.sort();
    files
}

pub fn parse_suite(name: &str, source: &str) -> Result<Vec<SuiteCase>, PdaError> {
    serde_yaml::from_str(source).map_err(|e| {
        let src = to_error_source(name, source);
        err_ctx!(
            Suite,
            e.to_string(),
            &src,
            yaml_span(&e, source),
            "a suite is a list of cases with name, validator, input and accept"
        )
    })
}

pub fn load_suite(path: &Path) -> Result<Vec<SuiteCase>, PdaError> {
    let source = fs::read_to_string(path).map_err(|e| PdaError::io(path.display(), e))?;
    parse_suite(&path.display().to_string(), &source)
}

// =============================================================================
// EXECUTION
// =============================================================================

pub fn skip_reason(case: &SuiteCase, has_only: bool, filter: Option<&str>) -> Option<String> {
    if case.skip {
        return Some("marked skip".to_string());
    }
    if has_only && !case.only {
        return Some("another case is marked only".to_string());
    }
    if let Some(filter) = filter {
        let filter = filter.to_lowercase();
        if !case.name.to_lowercase().contains(&filter) && case.validator.as_str() != filter {
            return Some(format!("filtered out by '{}'", filter));
        }
    }
    None
}

/// Validates the case and compares verdict, reason and step count.
pub fn run_case(file: String, case: SuiteCase) -> SuiteResult {
    let outcome = engine::validate(case.validator, &case.input);
    let verdict = outcome.verdict().unwrap_or_default();

    let mut problems = Vec::new();
    if outcome.accepted != case.accept {
        problems.push(format!(
            "expected {}, got {} ({})",
            verdict_word(case.accept),
            verdict_word(outcome.accepted),
            verdict
        ));
    }
    if let Some(reason) = &case.reason {
        if !verdict.contains(reason.as_str()) {
            problems.push(format!("expected reason containing '{}', got '{}'", reason, verdict));
        }
    }
    if let Some(steps) = case.steps {
        if outcome.step_count != steps {
            problems.push(format!("expected {} steps, got {}", steps, outcome.step_count));
        }
    }

    if problems.is_empty() {
        SuiteResult::Pass { file, name: case.name }
    } else {
        SuiteResult::Fail {
            file,
            name: case.name,
            error: problems.join("; "),
        }
    }
}

fn verdict_word(accepted: bool) -> &'static str {
    if accepted {
        "accept"
    } else {
        "reject"
    }
}

pub fn summarize(results: &[SuiteResult]) -> Summary {
    results.iter().fold(Summary::default(), |mut s, r| {
        match r {
            SuiteResult::Pass { .. } => s.passed += 1,
            SuiteResult::Fail { .. } => s.failed += 1,
            SuiteResult::Skipped { .. } => s.skipped += 1,
        }
        s
    })
}

/// Loads and runs every suite under `root`. Unreadable or malformed suite
/// files abort the run.
pub fn collect_results(root: &Path, filter: Option<&str>) -> Result<Vec<SuiteResult>, PdaError> {
    let mut cases = Vec::new();
    for path in discover_yaml_files(root) {
        let file = path.display().to_string();
        for case in load_suite(&path)? {
            cases.push((file.clone(), case));
        }
    }
    let has_only = cases.iter().any(|(_, case)| case.only);

    Ok(cases
        .into_iter()
        .map(|(file, case)| match skip_reason(&case, has_only, filter) {
            Some(reason) => SuiteResult::Skipped {
                file,
                name: case.name,
                reason,
            },
            None => run_case(file, case),
        })
        .collect())
}

// =============================================================================
// REPORTING
// =============================================================================

pub fn report_results(results: &[SuiteResult], config: &SuiteConfig) {
    for r in results {
        match r {
            SuiteResult::Pass { file, name } => {
                println!("{}: {} [{}]", config.colorize("PASS", GREEN), name, file)
            }
            SuiteResult::Fail { file, name, error } => {
                eprintln!("{}: {} [{}]", config.colorize("FAIL", RED), name, file);
                eprintln!("  Error: {}", error);
            }
            SuiteResult::Skipped { file, name, reason } => println!(
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                name,
                file,
                reason
            ),
        }
    }

    let summary = summarize(results);
    println!(
        "\nSuite summary: total {}, {} {}, {} {}, {} {}",
        results.len(),
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    );
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Runs every suite under the configured root, prints the report and returns
/// the counts.
pub fn run_all(filter: Option<&str>, config: &SuiteConfig) -> Result<Summary, PdaError> {
    let results = collect_results(&config.root, filter)?;
    report_results(&results, config);
    Ok(summarize(&results))
}
