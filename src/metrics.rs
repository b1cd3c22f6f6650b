//! Metric helpers for `raises`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. Without the
//! `metrics` feature the helpers compile to no-ops.

use crate::error::ExpectationFailure;

/// Name of the counter tracking classified expectations.
pub const EXPECTATIONS_TOTAL: &str = "raises_expectations_total";
/// Name of the counter tracking suite case verdicts.
pub const CASES_TOTAL: &str = "raises_cases_total";

/// Record one classified expectation.
///
/// The `outcome` label is `passed` or the failure's
/// [`label`](ExpectationFailure::label).
#[cfg(feature = "metrics")]
pub fn record_expectation(failure: Option<&ExpectationFailure>) {
    let outcome = failure.map_or("passed", ExpectationFailure::label);
    metrics::counter!(EXPECTATIONS_TOTAL, "outcome" => outcome).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub fn record_expectation(_failure: Option<&ExpectationFailure>) {}

/// Record one case verdict (`passed`, `failed` or `skipped`).
#[cfg(feature = "metrics")]
pub fn record_case(verdict: &'static str) {
    metrics::counter!(CASES_TOTAL, "verdict" => verdict).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub fn record_case(_verdict: &'static str) {}
