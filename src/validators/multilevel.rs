//! Two-stage check: is the sample well nested, and does the nested payload
//! look like a valid filename?
//!
//! Each stage runs on its own automaton; the composite automaton only carries
//! the bookkeeping steps and the final verdict, so its stack stays `[Z0]`.
//!
//! The payload is the first text strictly between a `>` and the next `<`. For
//! `<data>report.pdf</data>` that is `report.pdf`; for deeper nesting such as
//! `<a><b>x</b></a>` it is the empty string between `<a>` and `<b>`, in which
//! case the whole sample is classified by its content signature instead.
//! The gap never spans a line break: in `<d>\nx</d><e>a.pdf</e>` the payload
//! is the empty gap after `</d>`, not `\nx`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ContentValidator, FilenameValidator, TagValidator, Validator, ValidatorKind};
use crate::automaton::{Automaton, Outcome};
use crate::trace::{ActionKind, EPSILON};

static INNER_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r">(.*?)<").expect("static pattern"));

/// First text between `>` and `<` on a single line, possibly empty.
pub fn inner_content(sample: &str) -> Option<&str> {
    INNER_CONTENT
        .captures(sample)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MultilevelValidator;

impl MultilevelValidator {
    fn finish(automaton: &mut Automaton, stage: Outcome, accept: &str, reject: &str) -> bool {
        let accepted = stage.accepted;
        automaton.splice(stage);
        if accepted {
            automaton.accept(accept)
        } else {
            automaton.reject(EPSILON, reject)
        }
    }
}

impl Validator for MultilevelValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Multilevel
    }

    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.record(EPSILON, ActionKind::Start, "START - multilevel validation");

        if !(input.contains('<') && input.contains('>')) {
            automaton.record(
                EPSILON,
                ActionKind::Check,
                "CHECK - no tag structure, validating content signature",
            );
            let content = ContentValidator.validate(input);
            return Self::finish(
                automaton,
                content,
                "multilevel validation passed (content)",
                "content signature not recognized",
            );
        }

        let structure = TagValidator.validate(input);
        if !structure.accepted {
            return Self::finish(automaton, structure, "", "tag structure invalid");
        }
        automaton.splice(structure);

        match inner_content(input).filter(|inner| !inner.is_empty()) {
            Some(inner) => {
                automaton.record(EPSILON, ActionKind::Check, "CHECK - validating content as filename");
                let filename = FilenameValidator.validate(inner);
                let accepted = filename.accepted;
                automaton.splice_distinct(filename);
                if accepted {
                    automaton.accept("multilevel validation passed")
                } else {
                    automaton.reject(EPSILON, "content is not a valid filename")
                }
            }
            None => {
                automaton.record(
                    EPSILON,
                    ActionKind::Check,
                    "CHECK - no inner payload, validating content signature",
                );
                let content = ContentValidator.validate(input);
                Self::finish(
                    automaton,
                    content,
                    "multilevel validation passed (content)",
                    "content signature not recognized",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::State;

    #[test]
    fn nested_filename_payload_accepts() {
        let outcome = MultilevelValidator.validate("<data>report_final.pdf</data>");
        assert!(outcome.accepted);
        assert_eq!(outcome.final_stack, vec!["Z0"]);
        assert_eq!(outcome.final_state, State::Accept);
        assert_eq!(outcome.verdict(), Some("ACCEPT - multilevel validation passed"));
        assert!(outcome.trace.iter().any(|s| s.action == "ACCEPT - valid XML"));
        assert!(outcome.trace.iter().any(|s| s.action == "ACCEPT - valid filename"));
    }

    #[test]
    fn invalid_payload_rejects() {
        let outcome = MultilevelValidator.validate("<data>invalid.ppt</data>");
        assert!(!outcome.accepted);
        assert_eq!(outcome.verdict(), Some("REJECT - content is not a valid filename"));
        assert_eq!(outcome.final_stack, vec!["Z0"]);
    }

    #[test]
    fn broken_structure_short_circuits() {
        let outcome = MultilevelValidator.validate("<data>a.pdf</b>");
        assert!(!outcome.accepted);
        assert_eq!(outcome.verdict(), Some("REJECT - tag structure invalid"));
        assert!(!outcome.trace.iter().any(|s| s.action.contains("filename")));
    }

    #[test]
    fn no_markup_falls_back_to_content() {
        let outcome = MultilevelValidator.validate("%PDF-1.4");
        assert!(outcome.accepted);
        assert!(outcome.trace.iter().any(|s| s.action == "READ - PDF header"));

        assert!(!MultilevelValidator.validate("just words").accepted);
    }

    #[test]
    fn empty_payload_falls_back_to_content() {
        let outcome = MultilevelValidator.validate("<a><b>x.pdf</b></a>");
        assert!(!outcome.accepted);
        assert_eq!(outcome.verdict(), Some("REJECT - content signature not recognized"));
    }

    #[test]
    fn filename_steps_are_deduplicated() {
        let outcome = MultilevelValidator.validate("<f>aa.pdf</f>");
        assert!(outcome.accepted);
        let a_reads = outcome
            .trace
            .iter()
            .filter(|s| s.symbol == "a" && s.action == "READ - valid character")
            .count();
        assert_eq!(a_reads, 1);
    }

    #[test]
    fn inner_content_takes_the_first_gap() {
        assert_eq!(inner_content("<d>x.pdf</d>"), Some("x.pdf"));
        assert_eq!(inner_content("<a><b>x</b></a>"), Some(""));
        assert_eq!(inner_content("no tags"), None);
    }

    #[test]
    fn payload_never_spans_a_line_break() {
        let sample = "<d>\nx</d><e>a.pdf</e>";
        assert_eq!(inner_content(sample), Some(""));
        let outcome = MultilevelValidator.validate(sample);
        assert!(outcome.trace.iter().any(|s| s.action == "ACCEPT - valid XML"));
        assert!(outcome
            .trace
            .iter()
            .any(|s| s.action == "CHECK - no inner payload, validating content signature"));
        assert_eq!(outcome.verdict(), Some("REJECT - content signature not recognized"));
    }
}
