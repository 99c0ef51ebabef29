//! A traced pushdown-automaton engine.
//!
//! Five validators (filename, content signature, file type, tag nesting and a
//! multilevel composition) run on a small pushdown automaton and record every
//! step, so a verdict always comes with the path that led to it.
//!
//! ```
//! use pushdown::{engine, ValidatorKind};
//!
//! let outcome = engine::validate(ValidatorKind::Xml, "<data>HELLO</data>");
//! assert!(outcome.accepted);
//! assert_eq!(outcome.final_stack, vec!["Z0"]);
//! ```

pub use crate::automaton::{Automaton, Outcome, State, SENTINEL};
pub use crate::diagnostics::{ErrorContext, PdaError};
pub use crate::trace::{ActionKind, Step, Trace, EPSILON};
pub use crate::validators::{Validator, ValidatorKind};

pub mod automaton;
pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod harness;
pub mod probe;
pub mod trace;
pub mod transitions;
pub mod validators;
