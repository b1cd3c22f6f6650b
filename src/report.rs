//! Results of running a [`Suite`](crate::Suite).

use std::fmt;

use crate::error::CaseFailure;

/// Why a case was not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The case name did not contain the suite's filter.
    Filtered,
    /// An earlier case failed and the suite runs fail-fast.
    FailFast,
}

/// Outcome of a single case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The case passed.
    Passed,
    /// The case failed for the given reason.
    Failed(CaseFailure),
    /// The case was not run.
    Skipped(SkipReason),
}

impl Verdict {
    /// `true` for [`Verdict::Failed`].
    #[must_use]
    pub fn is_failure(&self) -> bool { matches!(self, Self::Failed(_)) }

    /// Lowercase label used for metrics and logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
            Self::Skipped(_) => "skipped",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("PASS"),
            Self::Failed(_) => f.write_str("FAIL"),
            Self::Skipped(_) => f.write_str("SKIP"),
        }
    }
}

/// Name and verdict of one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReport {
    name: String,
    verdict: Verdict,
}

impl CaseReport {
    pub(crate) fn new(name: String, verdict: Verdict) -> Self { Self { name, verdict } }

    /// Case name as declared.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// The case outcome.
    #[must_use]
    pub fn verdict(&self) -> &Verdict { &self.verdict }
}

/// Per-case outcomes of a suite run, in declaration order.
///
/// `Display` renders a one-line summary followed by one line per failed
/// case with its reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    suite: String,
    cases: Vec<CaseReport>,
}

impl Report {
    pub(crate) fn new(suite: String, cases: Vec<CaseReport>) -> Self { Self { suite, cases } }

    /// Name of the suite that produced this report.
    #[must_use]
    pub fn suite(&self) -> &str { &self.suite }

    /// All case reports in declaration order.
    #[must_use]
    pub fn cases(&self) -> &[CaseReport] { &self.cases }

    /// Look up a case by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize { self.count(|v| matches!(v, Verdict::Passed)) }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize { self.count(Verdict::is_failure) }

    /// Number of skipped cases.
    #[must_use]
    pub fn skipped(&self) -> usize { self.count(|v| matches!(v, Verdict::Skipped(_))) }

    /// `true` when no case failed.
    #[must_use]
    pub fn is_success(&self) -> bool { self.failed() == 0 }

    /// Failed cases paired with their failure reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &CaseFailure)> {
        self.cases.iter().filter_map(|case| match &case.verdict {
            Verdict::Failed(failure) => Some((case.name.as_str(), failure)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.cases.iter().filter(|case| pred(&case.verdict)).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "suite `{}`: {} passed, {} failed, {} skipped",
            self.suite,
            self.passed(),
            self.failed(),
            self.skipped()
        )?;
        for (name, failure) in self.failures() {
            write!(f, "\n  FAIL {name}: {failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpectationFailure;

    fn report() -> Report {
        Report::new(
            "catalogue".into(),
            vec![
                CaseReport::new("finds_seeded".into(), Verdict::Passed),
                CaseReport::new(
                    "rejects_unknown".into(),
                    Verdict::Failed(
                        ExpectationFailure::NoErrorRaised { expected: "NotFound" }.into(),
                    ),
                ),
                CaseReport::new("slow".into(), Verdict::Skipped(SkipReason::Filtered)),
            ],
        )
    }

    #[test]
    fn counts_each_verdict() {
        let report = report();
        assert_eq!(
            (report.passed(), report.failed(), report.skipped()),
            (1, 1, 1)
        );
        assert!(!report.is_success());
        assert_eq!(
            report.case("slow").map(CaseReport::verdict),
            Some(&Verdict::Skipped(SkipReason::Filtered))
        );
    }

    #[test]
    fn display_lists_failures() {
        assert_eq!(
            report().to_string(),
            "suite `catalogue`: 1 passed, 1 failed, 1 skipped\n  FAIL rejects_unknown: \
             expected error of type `NotFound` was not raised"
        );
    }
}
