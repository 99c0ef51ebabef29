//! Extension categories. A one-symbol automaton: the whole extension is read
//! as a single token and looked up in an ordered table.

use super::{Validator, ValidatorKind};
use crate::automaton::Automaton;
use crate::trace::{ActionKind, EPSILON};

/// Ordered category table; the first category listing an extension wins.
/// No extension is listed twice.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("pdf", &["pdf"]),
    ("doc", &["doc", "docx"]),
    ("image", &["jpg", "jpeg", "png", "gif", "bmp"]),
    ("spreadsheet", &["xls", "xlsx", "csv"]),
    ("text", &["txt", "text"]),
    ("markup", &["xml", "html", "htm"]),
    ("data", &["json", "yaml", "yml"]),
];

/// Category of `extension` (lowercase, no leading dot).
pub fn category_of(extension: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension))
        .map(|(category, _)| *category)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileTypeValidator;

impl Validator for FileTypeValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Filetype
    }

    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.record(EPSILON, ActionKind::Start, "START - file type validation");

        let extension = input.trim().trim_start_matches('.').to_lowercase();
        match category_of(&extension) {
            Some(category) => {
                automaton.record(
                    extension.as_str(),
                    ActionKind::Read,
                    format!("READ - {} file", category),
                );
                automaton.accept(format!("valid file type ({})", category))
            }
            None => {
                automaton.record(extension.as_str(), ActionKind::Read, "READ - file extension");
                automaton.reject(EPSILON, format!("file type '{}' not recognized", extension))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_no_overlap() {
        let mut seen = HashSet::new();
        for (_, extensions) in CATEGORIES {
            for ext in *extensions {
                assert!(seen.insert(*ext), "{} listed twice", ext);
            }
        }
    }

    #[test]
    fn known_extensions_name_their_category() {
        let outcome = FileTypeValidator.validate("DOCX");
        assert!(outcome.accepted);
        assert_eq!(outcome.verdict(), Some("ACCEPT - valid file type (doc)"));
        assert_eq!(outcome.trace.steps()[1].symbol, "docx");

        assert_eq!(category_of("jpeg"), Some("image"));
        assert_eq!(category_of("csv"), Some("spreadsheet"));
    }

    #[test]
    fn leading_dot_is_tolerated() {
        assert!(FileTypeValidator.validate(".png").accepted);
    }

    #[test]
    fn unknown_extensions_reject() {
        for ext in ["ppt", "mp4", ""] {
            let outcome = FileTypeValidator.validate(ext);
            assert!(!outcome.accepted);
            assert_eq!(outcome.step_count, 3);
        }
    }
}
