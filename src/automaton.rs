//! # Automaton State
//!
//! The mutable `(state, stack)` pair every validator drives, together with the
//! trace it leaves behind. An [`Automaton`] is an owned value: each validation
//! call builds its own, so two runs never observe each other's stack.
//!
//! ## Invariants
//! - The sentinel [`SENTINEL`] sits at index 0 and is never popped.
//! - `q_accept` and `q_reject` are terminal; no transition leaves them.
//! - [`Automaton::record`] snapshots the stack, it never mutates state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trace::{ActionKind, Step, Trace, EPSILON};

/// Permanent bottom-of-stack marker.
pub const SENTINEL: &str = "Z0";

/// The closed set of automaton states shared by all validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// Initial state; the filename validator also scans the base name here.
    #[serde(rename = "q0")]
    Start,
    /// Filename validator after the `.` marker was pushed.
    #[serde(rename = "q_dot")]
    AfterDot,
    /// Tag validator inside element content.
    #[serde(rename = "q_content")]
    Content,
    #[serde(rename = "q_accept")]
    Accept,
    #[serde(rename = "q_reject")]
    Reject,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Start => "q0",
            State::AfterDot => "q_dot",
            State::Content => "q_content",
            State::Accept => "q_accept",
            State::Reject => "q_reject",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Accept | State::Reject)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Result of one validation run, fully owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub accepted: bool,
    pub trace: Trace,
    pub final_stack: Vec<String>,
    pub final_state: State,
    pub step_count: usize,
}

impl Outcome {
    /// The reason attached to the terminal step.
    pub fn verdict(&self) -> Option<&str> {
        self.trace
            .last()
            .filter(|step| step.is_terminal())
            .map(|step| step.action.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Automaton {
    state: State,
    stack: Vec<String>,
    trace: Trace,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            stack: vec![SENTINEL.to_string()],
            trace: Trace::new(),
        }
    }

    /// Back to `q0`, `[Z0]` and an empty trace.
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.stack.clear();
        self.stack.push(SENTINEL.to_string());
        self.trace.clear();
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Top of the stack; the sentinel when nothing else is pushed.
    pub fn top(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or(SENTINEL)
    }

    /// `true` when only the sentinel remains.
    pub fn is_drained(&self) -> bool {
        self.stack.len() == 1 && self.stack[0] == SENTINEL
    }

    /// Symbols above the sentinel, bottom first.
    pub fn open_symbols(&self) -> &[String] {
        &self.stack[1.min(self.stack.len())..]
    }

    /// Appends a step describing the current state and stack.
    pub fn record(&mut self, symbol: impl Into<String>, kind: ActionKind, action: impl Into<String>) {
        self.trace.push(Step {
            symbol: symbol.into(),
            state: self.state,
            stack: self.stack.clone(),
            kind,
            action: action.into(),
        });
    }

    pub fn transition(&mut self, next: State) {
        debug_assert!(
            !self.state.is_terminal(),
            "transition out of terminal state {}",
            self.state
        );
        if !self.state.is_terminal() {
            self.state = next;
        }
    }

    pub fn push(&mut self, symbol: impl Into<String>) {
        self.stack.push(symbol.into());
    }

    /// Pops the top symbol; the sentinel is never removed.
    pub fn pop(&mut self) -> Option<String> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Moves to `q_accept` and records the closing ε-step.
    pub fn accept(&mut self, reason: impl Into<String>) -> bool {
        self.transition(State::Accept);
        self.record(EPSILON, ActionKind::Accept, format!("ACCEPT - {}", reason.into()));
        true
    }

    /// Moves to `q_reject` and records the closing step on `symbol`.
    pub fn reject(&mut self, symbol: impl Into<String>, reason: impl Into<String>) -> bool {
        self.transition(State::Reject);
        self.record(symbol, ActionKind::Reject, format!("REJECT - {}", reason.into()));
        false
    }

    /// Appends the trace of a sub-run. The sub-run's stack is not adopted.
    pub fn splice(&mut self, stage: Outcome) {
        self.trace.append(stage.trace);
    }

    /// Like [`Automaton::splice`], skipping steps already present.
    pub fn splice_distinct(&mut self, stage: Outcome) {
        self.trace.extend_distinct(stage.trace);
    }

    /// Hands the run over to the caller.
    pub fn into_outcome(self, accepted: bool) -> Outcome {
        Outcome {
            accepted,
            step_count: self.trace.len(),
            trace: self.trace,
            final_stack: self.stack,
            final_state: self.state,
        }
    }
}
