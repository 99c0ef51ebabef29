//! # Validators
//!
//! One hand-specified automaton per artifact kind. Every validator drives an
//! [`Automaton`] it is handed, records a step for every meaningful event and
//! finishes with an explicit accept or reject step.
//!
//! ## Module Structure
//!
//! - **`filename`**: name grammar with a single `.` marker on the stack
//! - **`content`**: magic-prefix classifier (`%PDF`, `PK`, plain text)
//! - **`filetype`**: extension to category table lookup
//! - **`tags`**: LIFO tag nesting over `<name>` / `</name>`
//! - **`multilevel`**: tag nesting, then the filename grammar on the payload
//!
//! ## Dispatch
//!
//! Callers pick a [`ValidatorKind`]; [`ValidatorKind::validator`] maps it onto
//! the single [`Validator`] interface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::automaton::{Automaton, Outcome};
use crate::diagnostics::{ErrorContext, PdaError};

pub mod content;
pub mod filename;
pub mod filetype;
pub mod multilevel;
pub mod tags;

pub use content::ContentValidator;
pub use filename::FilenameValidator;
pub use filetype::FileTypeValidator;
pub use multilevel::MultilevelValidator;
pub use tags::TagValidator;

// ============================================================================
// CORE TRAIT
// ============================================================================

/// A fixed automaton over one input string.
pub trait Validator: Send + Sync {
    /// Which kind this validator answers for.
    fn kind(&self) -> ValidatorKind;

    /// Drives `automaton` from `q0`, `[Z0]` to a terminal state and returns
    /// the verdict. Called only through [`Validator::run`].
    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool;

    /// Resets `automaton`, then scans `input` on it.
    fn run(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.reset();
        self.scan(input, automaton)
    }

    /// Runs on a brand-new automaton and hands the result to the caller.
    fn validate(&self, input: &str) -> Outcome {
        let mut automaton = Automaton::new();
        let accepted = self.run(input, &mut automaton);
        automaton.into_outcome(accepted)
    }
}

// ============================================================================
// VALIDATOR KINDS
// ============================================================================

/// The closed set of validators the engine offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    Filename,
    Content,
    Filetype,
    Xml,
    Multilevel,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 5] = [
        ValidatorKind::Filename,
        ValidatorKind::Content,
        ValidatorKind::Filetype,
        ValidatorKind::Xml,
        ValidatorKind::Multilevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Filename => "filename",
            ValidatorKind::Content => "content",
            ValidatorKind::Filetype => "filetype",
            ValidatorKind::Xml => "xml",
            ValidatorKind::Multilevel => "multilevel",
        }
    }

    pub fn validator(&self) -> &'static dyn Validator {
        match self {
            ValidatorKind::Filename => &FilenameValidator,
            ValidatorKind::Content => &ContentValidator,
            ValidatorKind::Filetype => &FileTypeValidator,
            ValidatorKind::Xml => &TagValidator,
            ValidatorKind::Multilevel => &MultilevelValidator,
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ValidatorKind {
    type Err = PdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ValidatorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = ValidatorKind::ALL.iter().map(|k| k.as_str()).collect();
                PdaError::UnknownValidator {
                    message: format!("'{}'", s),
                    ctx: ErrorContext::with_help(format!("expected one of: {}", names.join(", "))),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn names_round_trip() {
        for kind in ValidatorKind::ALL {
            assert_eq!(kind.as_str().parse::<ValidatorKind>().ok(), Some(kind));
            assert_eq!(kind.validator().kind(), kind);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("XML".parse::<ValidatorKind>().ok(), Some(ValidatorKind::Xml));
        assert_eq!(" Filename ".parse::<ValidatorKind>().ok(), Some(ValidatorKind::Filename));
    }

    #[test]
    fn unknown_names_are_errors_not_rejections() {
        let err = "parentheses".parse::<ValidatorKind>().expect_err("unknown");
        assert_eq!(err.error_type(), ErrorType::UnknownValidator);
        assert!(err.to_string().contains("parentheses"));
    }

    #[test]
    fn run_resets_a_used_automaton() {
        for kind in ValidatorKind::ALL {
            let validator = kind.validator();
            let mut automaton = Automaton::new();
            validator.run("<a>", &mut automaton);
            let accepted = validator.run("<b></b>", &mut automaton);
            let reused = automaton.into_outcome(accepted);
            assert_eq!(reused, validator.validate("<b></b>"), "{} kept old state", kind);
        }
    }
}
