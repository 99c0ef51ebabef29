//! Property-based tests for the engine: every run terminates with an explicit
//! verdict, accepted runs leave only the sentinel, and runs are deterministic.

use proptest::prelude::*;
use pushdown::engine::validate;
use pushdown::{ActionKind, State, ValidatorKind, SENTINEL};

fn any_kind() -> impl Strategy<Value = ValidatorKind> {
    prop::sample::select(ValidatorKind::ALL.to_vec())
}

/// Inputs biased towards the characters the validators care about.
fn interesting_input() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9_.@<>/% -]{0,40}",
        "(<[a-z]{1,3}>|</[a-z]{1,3}>|[a-z_.]{1,6}){0,6}",
        "(%PDF|PK)?[A-Za-z0-9@]{0,12}",
    ]
}

proptest! {
    #[test]
    fn trace_ends_with_a_verdict(kind in any_kind(), input in interesting_input()) {
        let outcome = validate(kind, &input);
        let last = outcome.trace.last().expect("trace is never empty");
        prop_assert!(last.kind.is_terminal());
        prop_assert_eq!(last.kind == ActionKind::Accept, outcome.accepted);
        prop_assert_eq!(last.state, outcome.final_state);
        prop_assert_eq!(outcome.step_count, outcome.trace.len());
    }

    #[test]
    fn accepted_runs_leave_only_the_sentinel(kind in any_kind(), input in interesting_input()) {
        let outcome = validate(kind, &input);
        if outcome.accepted {
            prop_assert_eq!(outcome.final_stack, vec![SENTINEL.to_string()]);
            prop_assert_eq!(outcome.final_state, State::Accept);
        } else {
            prop_assert_eq!(outcome.final_state, State::Reject);
        }
    }

    #[test]
    fn every_snapshot_keeps_the_sentinel_at_the_bottom(kind in any_kind(), input in interesting_input()) {
        let outcome = validate(kind, &input);
        for step in outcome.trace.iter() {
            prop_assert_eq!(step.stack.first().map(String::as_str), Some(SENTINEL));
        }
    }

    #[test]
    fn runs_are_deterministic(kind in any_kind(), input in interesting_input()) {
        let first = validate(kind, &input);
        let second = validate(kind, &input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn balanced_nesting_is_accepted(names in prop::collection::vec("[a-z]{1,4}", 1..6)) {
        let mut sample = String::new();
        for name in &names {
            sample.push_str(&format!("<{}>", name));
        }
        for name in names.iter().rev() {
            sample.push_str(&format!("</{}>", name));
        }
        let outcome = validate(ValidatorKind::Xml, &sample);
        prop_assert!(outcome.accepted, "{} rejected: {:?}", sample, outcome.verdict());
        let deepest = outcome.trace.iter().map(|s| s.stack.len()).max().unwrap_or(0);
        prop_assert_eq!(deepest, names.len() + 1);
    }
}

#[test]
fn parallel_runs_match_sequential_runs() {
    use std::thread;

    let inputs = ["<a><b></b></a>", "report_final.pdf", "<data>invalid.ppt</data>"];
    let expected: Vec<_> = inputs
        .iter()
        .map(|i| validate(ValidatorKind::Multilevel, i))
        .collect();
    let handles: Vec<_> = inputs
        .iter()
        .map(|i| {
            let input = i.to_string();
            thread::spawn(move || validate(ValidatorKind::Multilevel, &input))
        })
        .collect();
    let actual: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    assert_eq!(actual, expected);
}
