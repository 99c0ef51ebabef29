//! User-facing output for the CLI: colored trace tables and JSON.

use std::fs;
use std::path::Path;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::batch::BatchReport;
use crate::catalog;
use crate::diagnostics::PdaError;
use crate::engine::Report;
use crate::err_msg;
use crate::trace::ActionKind;
use crate::transitions::TransitionEntry;
use crate::validators::ValidatorKind;

// ============================================================================
// JSON
// ============================================================================

pub fn to_json<T: Serialize>(value: &T) -> Result<String, PdaError> {
    serde_json::to_string_pretty(value).map_err(|e| err_msg!(Input, "could not encode JSON: {}", e))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), PdaError> {
    println!("{}", to_json(value)?);
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PdaError> {
    let text = to_json(value)?;
    fs::write(path, text + "\n").map_err(|e| PdaError::io(path.display(), e))
}

// ============================================================================
// TABLES
// ============================================================================

/// Verdict line followed by the step-by-step trace.
pub fn print_report(report: &Report<'_>, shown_input: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    println!("validator: {}", report.validator);
    println!("input:     {}", shown_input);
    print_verdict(&mut stdout, report.outcome.accepted);
    if let Some(reason) = report.outcome.verdict() {
        println!("           {}", reason);
    }
    println!(
        "final:     {} with stack [{}] ({} steps)",
        report.outcome.final_state,
        report.outcome.final_stack.join(", "),
        report.outcome.step_count
    );
    println!();

    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    println!("{:>4}  {:<14} {:<10} {:<24} ACTION", "#", "SYMBOL", "STATE", "STACK");
    let _ = stdout.reset();

    for (i, step) in report.outcome.trace.iter().enumerate() {
        let color = match step.kind {
            ActionKind::Accept => Some(Color::Green),
            ActionKind::Reject => Some(Color::Red),
            ActionKind::Push | ActionKind::Pop => Some(Color::Cyan),
            ActionKind::Check | ActionKind::Start => Some(Color::Yellow),
            ActionKind::Read => None,
        };
        println!(
            "{:>4}  {:<14} {:<10} {:<24} {}",
            i + 1,
            truncate(&step.symbol, 14),
            step.state,
            truncate(&step.stack.join(","), 24),
            paint(&mut stdout, color, &step.action)
        );
    }
}

pub fn print_transition_table(kind: ValidatorKind, table: &[TransitionEntry]) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    println!("{} transitions", kind);
    println!(
        "{:<18} {:<22} {:<10} {:<18} ACTION",
        "STATE", "INPUT", "TOP", "NEW STATE"
    );
    let _ = stdout.reset();
    for entry in table {
        println!(
            "{:<18} {:<22} {:<10} {:<18} {}",
            entry.state, entry.input, entry.stack_top, entry.next_state, entry.action
        );
    }
}

pub fn print_samples(kinds: &[ValidatorKind]) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for kind in kinds {
        let info = catalog::info(*kind);
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        println!("{} ({})", kind, info.name);
        let _ = stdout.reset();
        println!("  {}", info.description);
        println!("  files: {}", info.supported_files.join(" "));
        for sample in catalog::samples(*kind) {
            println!("    {}", sample);
        }
        println!();
    }
}

pub fn print_batch(report: &BatchReport) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for entry in &report.results {
        let color = if entry.errored {
            Color::Magenta
        } else if entry.accepted {
            Color::Green
        } else {
            Color::Red
        };
        let tag = if entry.errored {
            "ERROR"
        } else if entry.accepted {
            "VALID"
        } else {
            "INVALID"
        };
        println!("{} {}: {}", paint(&mut stdout, Some(color), tag), entry.label, entry.detail);
    }
    let stats = &report.statistics;
    println!(
        "\n{} batch: {} total, {} valid, {} invalid ({}% valid)",
        report.validator, stats.total, stats.valid, stats.invalid, stats.valid_percentage
    );
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_verdict(stdout: &mut StandardStream, accepted: bool) {
    let (color, word) = if accepted {
        (Color::Green, "ACCEPTED")
    } else {
        (Color::Red, "REJECTED")
    };
    println!("verdict:   {}", paint(stdout, Some(color), word));
}

/// Wraps `text` in the stream's color codes when it supports color.
fn paint(stdout: &mut StandardStream, color: Option<Color>, text: &str) -> String {
    match color {
        Some(color) if stdout.supports_color() => {
            let mut buffer = termcolor::Buffer::ansi();
            let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
            let _ = std::io::Write::write_all(&mut buffer, text.as_bytes());
            let _ = buffer.reset();
            String::from_utf8_lossy(buffer.as_slice()).into_owned()
        }
        _ => text.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}
