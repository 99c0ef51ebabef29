//! Content signatures. A flat classifier over a (caller-truncated) sample:
//! `%PDF` before `PK` before plain alphanumeric text. The stack is never
//! touched.

use super::{Validator, ValidatorKind};
use crate::automaton::Automaton;
use crate::trace::{ActionKind, EPSILON};

pub const PDF_MAGIC: &str = "%PDF";
pub const ZIP_MAGIC: &str = "PK";

/// How many characters of a plain-text sample are traced.
pub const TEXT_TRACE_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentValidator;

impl Validator for ContentValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Content
    }

    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.record(EPSILON, ActionKind::Start, "START - content validation");

        if input.starts_with(PDF_MAGIC) {
            for c in PDF_MAGIC.chars() {
                automaton.record(c.to_string(), ActionKind::Read, "READ - PDF header");
            }
            return automaton.accept("valid PDF file");
        }

        if input.starts_with(ZIP_MAGIC) {
            automaton.record("P", ActionKind::Read, "READ - first DOCX character");
            automaton.record("K", ActionKind::Read, "READ - second DOCX character");
            return automaton.accept("valid DOCX file");
        }

        if is_plain_text(input) {
            for c in input.chars().take(TEXT_TRACE_LIMIT) {
                automaton.record(c.to_string(), ActionKind::Read, "READ - valid TXT character");
            }
            return automaton.accept("valid TXT file");
        }

        automaton.reject(EPSILON, "unrecognized format")
    }
}

/// Non-empty and alphanumeric throughout.
fn is_plain_text(sample: &str) -> bool {
    !sample.is_empty() && sample.chars().all(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_prefix_reads_four_characters() {
        let outcome = ContentValidator.validate("%PDF-1.7 binary follows");
        assert!(outcome.accepted);
        let symbols: Vec<_> = outcome.trace.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec![EPSILON, "%", "P", "D", "F", EPSILON]);
        assert_eq!(outcome.verdict(), Some("ACCEPT - valid PDF file"));
    }

    #[test]
    fn zip_prefix_reads_two_characters() {
        let outcome = ContentValidator.validate("PK@@@");
        assert!(outcome.accepted);
        assert_eq!(outcome.step_count, 4);
        assert_eq!(outcome.verdict(), Some("ACCEPT - valid DOCX file"));
    }

    #[test]
    fn plain_text_traces_at_most_ten_characters() {
        let outcome = ContentValidator.validate("plaintext123456");
        assert!(outcome.accepted);
        let reads = outcome.trace.iter().filter(|s| s.kind == ActionKind::Read).count();
        assert_eq!(reads, TEXT_TRACE_LIMIT);
    }

    #[test]
    fn everything_else_is_unrecognized() {
        for sample in ["@@@garbage@@@", "XPDF 123", "", "hello world"] {
            let outcome = ContentValidator.validate(sample);
            assert!(!outcome.accepted, "{:?} should be rejected", sample);
            assert_eq!(outcome.verdict(), Some("REJECT - unrecognized format"));
            assert_eq!(outcome.final_stack, vec!["Z0"]);
        }
    }
}
