//! Tag nesting for XML/HTML-like samples.
//!
//! The tokenizer walks the sample one character at a time. `<name>` pushes
//! `name`, `</name>` must match the stack top exactly and pops it. Anything
//! else inside element content is read without touching the stack. Nesting is
//! strictly LIFO, so interleaved elements always reject.
//!
//! Tag names are taken verbatim between the brackets: attributes and a
//! self-closing `/` are part of the name.

use super::{Validator, ValidatorKind};
use crate::automaton::{Automaton, State};
use crate::trace::{ActionKind, EPSILON};

/// Where the tokenizer is relative to the angle brackets.
#[derive(Debug)]
enum Token {
    /// Between tags.
    Outside,
    /// After `<`, collecting an opening name.
    Opening(String),
    /// After `</`, collecting a closing name.
    Closing(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TagValidator;

impl Validator for TagValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Xml
    }

    fn scan(&self, input: &str, automaton: &mut Automaton) -> bool {
        automaton.record(EPSILON, ActionKind::Start, "START - XML validation");

        let mut token = Token::Outside;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '<' => {
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        automaton.record("</", ActionKind::Read, "READ - closing tag");
                        token = Token::Closing(String::new());
                    } else {
                        automaton.record("<", ActionKind::Read, "READ - opening tag");
                        token = Token::Opening(String::new());
                    }
                }
                '>' => match std::mem::replace(&mut token, Token::Outside) {
                    Token::Opening(name) => {
                        automaton.push(name.as_str());
                        automaton.record(">", ActionKind::Push, format!("PUSH {} - opening tag", name));
                        automaton.transition(State::Content);
                    }
                    Token::Closing(name) => {
                        if automaton.is_drained() || automaton.top() != name {
                            let expected = if automaton.is_drained() {
                                "nothing".to_string()
                            } else {
                                automaton.top().to_string()
                            };
                            return automaton.reject(
                                ">",
                                format!("tag mismatch (opened: {}, closed: {})", expected, name),
                            );
                        }
                        automaton.pop();
                        automaton.record(">", ActionKind::Pop, format!("POP {} - closing tag matches", name));
                    }
                    Token::Outside => read_content(automaton, c),
                },
                _ => match &mut token {
                    Token::Opening(name) | Token::Closing(name) => name.push(c),
                    Token::Outside => read_content(automaton, c),
                },
            }
        }

        // A tag cut off by the end of input never reaches the stack.
        let dangling = match token {
            Token::Opening(name) => Some(format!("<{}", name)),
            Token::Closing(name) => Some(format!("</{}", name)),
            Token::Outside => None,
        };
        if let Some(fragment) = dangling {
            automaton.record(
                EPSILON,
                ActionKind::Check,
                format!("CHECK - unterminated tag {} ignored", fragment),
            );
        }

        if automaton.is_drained() {
            automaton.accept("valid XML")
        } else {
            let open = automaton.open_symbols().join(", ");
            automaton.reject(EPSILON, format!("unclosed tags: {}", open))
        }
    }
}

/// Element content is traced; text before the first tag is skipped.
fn read_content(automaton: &mut Automaton, c: char) {
    if automaton.state() == State::Content {
        automaton.record(c.to_string(), ActionKind::Read, "READ - content");
    }
}
