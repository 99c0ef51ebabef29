//! Runs every YAML suite under tests/suites as part of `cargo test`.
//!
//! `SUITE_FILTER` narrows the run to cases whose name or validator matches.

use std::env;
use std::path::Path;

use pushdown::harness::{self, SuiteConfig};

#[test]
fn yaml_suites_pass() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/suites");
    let filter = env::var("SUITE_FILTER").ok();
    let summary = harness::run_all(filter.as_deref(), &SuiteConfig::with_root(root))
        .unwrap_or_else(|e| panic!("{:?}", miette::Report::new(e)));
    assert!(summary.passed > 0, "no suite cases ran");
    assert_eq!(summary.failed, 0, "{} suite case(s) failed", summary.failed);
}
