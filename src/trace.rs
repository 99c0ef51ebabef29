//! Trace recording.
//!
//! A [`Trace`] is the append-only log a validation run leaves behind. Each
//! [`Step`] owns a copy of the stack as it was when the step was recorded, so
//! later pushes and pops never rewrite history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::automaton::State;

/// The empty input symbol, used for bookkeeping steps that consume nothing.
pub const EPSILON: &str = "ε";

/// What a step did to the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Start,
    Read,
    Push,
    Pop,
    Check,
    Accept,
    Reject,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Start => "START",
            ActionKind::Read => "READ",
            ActionKind::Push => "PUSH",
            ActionKind::Pop => "POP",
            ActionKind::Check => "CHECK",
            ActionKind::Accept => "ACCEPT",
            ActionKind::Reject => "REJECT",
        }
    }

    /// Accept and reject end a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionKind::Accept | ActionKind::Reject)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Input character or token consumed, or [`EPSILON`].
    pub symbol: String,
    /// State at the time the step was recorded.
    pub state: State,
    /// Snapshot of the stack, bottom first.
    pub stack: Vec<String>,
    pub kind: ActionKind,
    /// Human-readable description, e.g. `PUSH . - dot found`.
    pub action: String,
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:<10} [{}] {}",
            self.symbol,
            self.state,
            self.stack.join(", "),
            self.action
        )
    }
}

/// Append-only sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Appends the steps of `other` that are not structurally equal to a step
    /// already present.
    pub fn extend_distinct(&mut self, other: Trace) {
        for step in other.steps {
            if !self.steps.contains(&step) {
                self.steps.push(step);
            }
        }
    }

    /// Appends every step of `other` in order.
    pub fn append(&mut self, other: Trace) {
        self.steps.extend(other.steps);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
