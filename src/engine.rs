//! The call contract offered to callers: pick a validator, hand over one
//! input, get back an [`Outcome`].

use log::debug;

use crate::automaton::Outcome;
use crate::diagnostics::PdaError;
use crate::transitions::{transition_table, TransitionEntry};
use crate::validators::ValidatorKind;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Validates `input` with a fresh automaton.
pub fn validate(kind: ValidatorKind, input: &str) -> Outcome {
    let outcome = kind.validator().validate(input);
    debug!(
        "{} validator {} input of {} chars in {} steps",
        kind,
        if outcome.accepted { "accepted" } else { "rejected" },
        input.chars().count(),
        outcome.step_count
    );
    outcome
}

/// Like [`validate`] for a validator chosen by name. An unknown name is an
/// error, never a rejection.
pub fn validate_named(name: &str, input: &str) -> Result<Outcome, PdaError> {
    let kind = name.parse::<ValidatorKind>()?;
    Ok(validate(kind, input))
}

/// A validation outcome bundled with the rules of its validator, the shape
/// the CLI prints.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report<'a> {
    pub validator: ValidatorKind,
    pub input: &'a str,
    #[serde(flatten)]
    pub outcome: &'a Outcome,
    pub stack_size: usize,
    pub transition_table: &'static [TransitionEntry],
}

impl<'a> Report<'a> {
    pub fn new(validator: ValidatorKind, input: &'a str, outcome: &'a Outcome) -> Self {
        Self {
            validator,
            input,
            outcome,
            stack_size: outcome.final_stack.len(),
            transition_table: transition_table(validator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn validate_matches_the_validator_run() {
        for kind in ValidatorKind::ALL {
            for input in ["<a></a>", "report_final.pdf", "pdf"] {
                assert_eq!(validate(kind, input), kind.validator().validate(input));
            }
        }
    }

    #[test]
    fn validate_named_dispatches() {
        let outcome = validate_named("filename", "report_final.pdf").expect("known kind");
        assert!(outcome.accepted);
    }

    #[test]
    fn validate_named_rejects_unknown_kinds_as_errors() {
        let err = validate_named("json", "{}").expect_err("unknown kind");
        assert_eq!(err.error_type(), ErrorType::UnknownValidator);
    }

    #[test]
    fn report_flattens_the_outcome() {
        let outcome = validate(ValidatorKind::Xml, "<a></a>");
        let report = Report::new(ValidatorKind::Xml, "<a></a>", &outcome);
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["accepted"], true);
        assert_eq!(json["validator"], "xml");
        assert_eq!(json["stack_size"], 1);
        assert_eq!(json["final_state"], "q_accept");
        assert!(json["trace"].is_array());
        assert!(json["transition_table"].is_array());
    }
}
