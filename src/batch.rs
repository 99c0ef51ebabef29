//! Batch validation. Items are independent, so they run in parallel; each one
//! gets its own automaton through [`engine::validate`].

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::automaton::State;
use crate::diagnostics::PdaError;
use crate::engine;
use crate::validators::ValidatorKind;

/// One input of a batch: a label for reporting, and either the prepared input
/// or the error that kept it from being prepared.
#[derive(Debug)]
pub struct BatchItem {
    pub label: String,
    pub input: Result<String, PdaError>,
}

impl BatchItem {
    pub fn ready(label: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input: Ok(input.into()),
        }
    }

    pub fn failed(label: impl Into<String>, error: PdaError) -> Self {
        Self {
            label: label.into(),
            input: Err(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub label: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_state: Option<State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<usize>,
    /// Reason of the terminal step, or the preparation error.
    pub detail: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub errored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Rounded to two decimals; 0 for an empty batch.
    pub valid_percentage: f64,
}

impl Statistics {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let total = entries.len();
        let valid = entries.iter().filter(|e| e.accepted).count();
        let valid_percentage = if total > 0 {
            (valid as f64 / total as f64 * 10_000.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            total,
            valid,
            invalid: total - valid,
            valid_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub validator: ValidatorKind,
    pub results: Vec<BatchEntry>,
    pub statistics: Statistics,
}

/// Validates every item with `kind`; results keep the input order.
pub fn validate_all(kind: ValidatorKind, items: Vec<BatchItem>) -> BatchReport {
    let results: Vec<BatchEntry> = items
        .into_par_iter()
        .map(|item| match item.input {
            Ok(input) => {
                let outcome = engine::validate(kind, &input);
                BatchEntry {
                    label: item.label,
                    accepted: outcome.accepted,
                    steps: Some(outcome.step_count),
                    final_state: Some(outcome.final_state),
                    stack_size: Some(outcome.final_stack.len()),
                    detail: outcome.verdict().unwrap_or_default().to_string(),
                    errored: false,
                }
            }
            Err(error) => BatchEntry {
                label: item.label,
                accepted: false,
                steps: None,
                final_state: None,
                stack_size: None,
                detail: error.to_string(),
                errored: true,
            },
        })
        .collect();

    let statistics = Statistics::from_entries(&results);
    info!(
        "{} batch: {} of {} valid ({}%)",
        kind, statistics.valid, statistics.total, statistics.valid_percentage
    );
    BatchReport {
        validator: kind,
        results,
        statistics,
    }
}
