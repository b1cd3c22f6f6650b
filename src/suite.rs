//! Test-case descriptors and a sequential suite runner.
//!
//! A [`TestCase`] pairs a body with an optional [`ExpectedError`]. A
//! [`Suite`] owns a setup hook that builds a fresh fixture for every case and
//! moves it into the case body, so no state is shared between cases. Cases
//! run in declaration order on the calling thread.
//!
//! ```
//! use raises::{ExpectedError, Suite, TestCase};
//!
//! let report = Suite::new("parsing", || String::from("forty"))
//!     .case(
//!         TestCase::new("rejects_words", |input: String| input.parse::<u8>())
//!             .expect_error(ExpectedError::of::<std::num::ParseIntError>()),
//!     )
//!     .case(TestCase::new("has_length", |input: String| {
//!         assert_eq!(input.len(), 5);
//!     }))
//!     .run();
//! assert!(report.is_success(), "{report}");
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

use log::debug;

use crate::{
    error::CaseFailure,
    expected::ExpectedError,
    matcher::capture,
    metrics,
    panic::PanicMessage,
    raised::{Raised, UnitResult},
    report::{CaseReport, Report, SkipReason, Verdict},
};

type Body<F> = Box<dyn FnOnce(F) -> Option<Raised>>;

/// A named test body with an optional expected error.
pub struct TestCase<F> {
    name: String,
    body: Body<F>,
    expected: Option<ExpectedError>,
}

impl<F: 'static> TestCase<F> {
    /// Declare a case whose body receives the fixture by value.
    ///
    /// The body may return `()`, any `Result` whose error converts into a
    /// [`BoxError`](crate::BoxError), or a [`Local`](crate::Local) result;
    /// panics are captured as well.
    pub fn new<B, R>(name: impl Into<String>, body: B) -> Self
    where
        B: FnOnce(F) -> R + 'static,
        R: UnitResult,
    {
        Self {
            name: name.into(),
            body: Box::new(move |fixture| capture(move || body(fixture))),
            expected: None,
        }
    }

    /// Attach the error the body is expected to raise.
    #[must_use]
    pub fn expect_error(mut self, expected: ExpectedError) -> Self {
        self.expected = Some(expected);
        self
    }
}

impl<F> TestCase<F> {
    /// The case name.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// The attached expectation, if any.
    #[must_use]
    pub fn expected(&self) -> Option<&ExpectedError> { self.expected.as_ref() }
}

/// An ordered collection of cases sharing a setup hook.
#[must_use]
pub struct Suite<F> {
    name: String,
    setup: Box<dyn Fn() -> F>,
    cases: Vec<TestCase<F>>,
    fail_fast: bool,
    filter: Option<String>,
}

impl Suite<()> {
    /// A suite whose cases take no fixture.
    pub fn without_fixture(name: impl Into<String>) -> Self { Self::new(name, || ()) }
}

impl<F: 'static> Suite<F> {
    /// Create an empty suite. `setup` runs once before every case.
    pub fn new(name: impl Into<String>, setup: impl Fn() -> F + 'static) -> Self {
        Self {
            name: name.into(),
            setup: Box::new(setup),
            cases: Vec::new(),
            fail_fast: false,
            filter: None,
        }
    }

    /// Append a case.
    pub fn case(mut self, case: TestCase<F>) -> Self {
        self.cases.push(case);
        self
    }

    /// Skip all remaining cases after the first failure.
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Only run cases whose names contain `pattern`; others are skipped.
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Number of declared cases.
    #[must_use]
    pub fn len(&self) -> usize { self.cases.len() }

    /// `true` if no cases were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.cases.is_empty() }

    /// Run every case in order and collect the verdicts.
    ///
    /// Each expectation is consulted once and dropped with its case.
    #[must_use]
    pub fn run(self) -> Report {
        let Self {
            name: suite,
            setup,
            cases,
            fail_fast,
            filter,
        } = self;
        let span = tracing::info_span!("suite", suite = %suite);
        let _entered = span.enter();

        let mut reports = Vec::with_capacity(cases.len());
        let mut halted = false;
        for case in cases {
            let verdict = if halted {
                Verdict::Skipped(SkipReason::FailFast)
            } else if filter
                .as_deref()
                .is_some_and(|pattern| !case.name.contains(pattern))
            {
                Verdict::Skipped(SkipReason::Filtered)
            } else {
                run_case(setup.as_ref(), case.body, case.expected.as_ref())
            };

            match &verdict {
                Verdict::Failed(failure) => {
                    tracing::warn!(case = %case.name, reason = %failure, "case failed");
                }
                other => debug!("case finished: case={}, verdict={}", case.name, other.label()),
            }
            metrics::record_case(verdict.label());
            halted |= fail_fast && verdict.is_failure();
            reports.push(CaseReport::new(case.name, verdict));
        }

        let report = Report::new(suite, reports);
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "suite finished"
        );
        report
    }
}

fn run_case<F>(setup: &dyn Fn() -> F, body: Body<F>, expected: Option<&ExpectedError>) -> Verdict {
    let fixture = match catch_unwind(AssertUnwindSafe(setup)) {
        Ok(fixture) => fixture,
        Err(payload) => {
            return Verdict::Failed(CaseFailure::SetupPanicked {
                message: PanicMessage::from_payload(payload).to_string(),
            });
        }
    };
    let outcome = body(fixture);
    match (expected, outcome) {
        (Some(expected), outcome) => match expected.classify(outcome) {
            Ok(()) => Verdict::Passed,
            Err(failure) => Verdict::Failed(failure.into()),
        },
        (None, None) => Verdict::Passed,
        (None, Some(raised)) => Verdict::Failed(CaseFailure::Unexpected {
            type_name: raised.type_name().to_owned(),
            message: raised.message(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, rc::Rc};

    use tracing_test::traced_test;

    use super::*;
    use crate::error::ExpectationFailure;

    #[test]
    fn setup_runs_once_per_executed_case() {
        let setups = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&setups);
        let report = Suite::new("fixtures", move || {
            *counter.borrow_mut() += 1;
            Vec::<u8>::new()
        })
        .case(TestCase::new("push", |mut v: Vec<u8>| {
            v.push(1);
            assert_eq!(v.len(), 1);
        }))
        .case(TestCase::new("still_empty", |v: Vec<u8>| assert!(v.is_empty())))
        .case(TestCase::new("other", |_: Vec<u8>| ()))
        .filter("s")
        .run();

        assert!(report.is_success(), "{report}");
        assert_eq!(report.skipped(), 1);
        assert_eq!(*setups.borrow(), 2);
    }

    #[test]
    fn setup_panic_fails_case_without_running_body() {
        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        let report = Suite::new("broken", || -> u8 { panic!("no database") })
            .case(TestCase::new("body", move |_: u8| *flag.borrow_mut() = true))
            .run();

        assert_eq!(
            report.case("body").map(CaseReport::verdict),
            Some(&Verdict::Failed(CaseFailure::SetupPanicked {
                message: "no database".into()
            }))
        );
        assert!(!*ran.borrow());
    }

    #[test]
    fn unexpected_error_without_expectation_fails() {
        let suite = Suite::without_fixture("plain");
        assert!(suite.is_empty());
        let report = suite
            .case(TestCase::new("io", |()| Err::<(), _>(io::Error::other("eof"))))
            .run();
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(
            failures,
            vec![(
                "io",
                &CaseFailure::Unexpected {
                    type_name: "std::io::error::Error".into(),
                    message: "eof".into(),
                }
            )]
        );
    }

    #[test]
    fn descriptors_expose_expectation() {
        let case = TestCase::new("lookup", |()| ())
            .expect_error(ExpectedError::of::<io::Error>().with_message("gone"));
        assert_eq!(case.name(), "lookup");
        assert_eq!(case.expected().and_then(ExpectedError::message), Some("gone"));
    }

    #[traced_test]
    #[test]
    fn failures_are_logged_with_reason() {
        let report = Suite::without_fixture("logged")
            .case(TestCase::new("silent", |()| ()).expect_error(ExpectedError::panic()))
            .run();

        assert_eq!(
            report.failures().next().map(|(_, failure)| failure.clone()),
            Some(CaseFailure::Expectation(ExpectationFailure::NoErrorRaised {
                expected: "panic"
            }))
        );
        assert!(logs_contain("case failed"));
        assert!(logs_contain("suite finished"));
    }
}
