//! Filename grammar: `[A-Za-z0-9_]+ "." [A-Za-z0-9]+` with an allow-listed
//! extension. The `.` is pushed when seen and popped once the extension is
//! known to be allowed.

use super::{Validator, ValidatorKind};
use crate::automaton::{Automaton, State};
use crate::trace::{ActionKind, EPSILON};

/// Extensions a filename may end in, compared lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["pdf", "docx", "xlsx", "txt", "jpg", "png", "xml", "html"];

/// Punctuation that gets its own rejection reason.
const FORBIDDEN: &str = "@?#!%&*";

const DOT: &str = ".";

#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameValidator;

impl Validator for FilenameValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Filename
    }

    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.record(EPSILON, ActionKind::Start, "START - filename validation");

        let mut dot_found = false;
        for c in input.chars() {
            let symbol = c.to_string();
            match automaton.state() {
                State::Start => {
                    if c.is_alphanumeric() || c == '_' {
                        automaton.record(symbol, ActionKind::Read, "READ - valid character");
                    } else if c == '.' {
                        if dot_found {
                            return automaton.reject(symbol, "more than one dot");
                        }
                        dot_found = true;
                        automaton.push(DOT);
                        automaton.record(symbol, ActionKind::Push, "PUSH . - dot found");
                        automaton.transition(State::AfterDot);
                    } else if FORBIDDEN.contains(c) {
                        return automaton.reject(symbol, format!("invalid character '{}'", c));
                    } else {
                        return automaton.reject(symbol, format!("character '{}' not allowed", c));
                    }
                }
                State::AfterDot => {
                    if c.is_alphanumeric() {
                        automaton.record(symbol, ActionKind::Read, "READ - extension character");
                    } else if c == '.' {
                        return automaton.reject(symbol, "more than one dot");
                    } else {
                        return automaton
                            .reject(symbol, format!("invalid extension character '{}'", c));
                    }
                }
                _ => break,
            }
        }

        if !dot_found {
            return automaton.reject(EPSILON, "no dot found");
        }

        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 2 {
            return automaton.reject(EPSILON, "malformed name");
        }

        let extension = parts[1].to_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return automaton.reject(EPSILON, format!("extension '{}' not allowed", extension));
        }

        if automaton.top() == DOT {
            automaton.pop();
            automaton.record(EPSILON, ActionKind::Pop, "POP . - extension valid");
        }

        if automaton.is_drained() {
            automaton.accept("valid filename")
        } else {
            automaton.reject(EPSILON, "stack not empty")
        }
    }
}
