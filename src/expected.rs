//! The expected-error record and its classification step.
//!
//! An [`ExpectedError`] names the type a unit under test must raise and,
//! optionally, the exact message it must carry. It is built once per test
//! declaration and consulted once, by [`ExpectedError::classify`], after the
//! unit has run.

use std::{any::type_name, error::Error, fmt, iter};

use crate::{
    error::ExpectationFailure,
    metrics,
    raised::{PANIC_TYPE_NAME, Raised},
};

/// How a raised error's type is compared with the expected type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeMatch {
    /// The raised error's concrete type must be the expected type.
    ///
    /// Errors returned as `Box<dyn Error>` are compared by the concrete type
    /// inside the box.
    #[default]
    Exact,
    /// The expected type may appear anywhere in the raised error's
    /// [`source`](Error::source) chain, starting with the error itself.
    ///
    /// The expected message, if any, is compared against the matching link.
    SourceChain,
}

type TypePredicate = fn(&(dyn Error + 'static)) -> bool;

fn is_type<T: Error + 'static>(error: &(dyn Error + 'static)) -> bool { error.is::<T>() }

#[derive(Clone, Copy)]
enum Kind {
    Error {
        type_name: &'static str,
        is_type: TypePredicate,
    },
    Panic,
}

/// Expected type and optional message of a failure raised by a unit under test.
///
/// ```
/// use raises::{ExpectedError, ExpectationFailure, Raised};
///
/// let expected = ExpectedError::of::<std::io::Error>().with_message("gone");
/// let raised = Raised::from_error(std::io::Error::other("gone"));
/// assert_eq!(expected.classify(Some(raised)), Ok(()));
///
/// assert!(matches!(
///     expected.classify(None),
///     Err(ExpectationFailure::NoErrorRaised { .. })
/// ));
/// ```
#[derive(Clone)]
#[must_use]
pub struct ExpectedError {
    kind: Kind,
    message: Option<String>,
    policy: TypeMatch,
}

impl ExpectedError {
    /// Expect the unit to return an error of type `T`.
    pub fn of<T: Error + 'static>() -> Self {
        Self {
            kind: Kind::Error {
                type_name: type_name::<T>(),
                is_type: is_type::<T>,
            },
            message: None,
            policy: TypeMatch::default(),
        }
    }

    /// Expect the unit to panic.
    ///
    /// A panic never satisfies an error-type expectation and an error value
    /// never satisfies a panic expectation. The panic hook runs before the
    /// panic is caught, so its message still reaches stderr.
    pub fn panic() -> Self {
        Self {
            kind: Kind::Panic,
            message: None,
            policy: TypeMatch::default(),
        }
    }

    /// Require the raised message to equal `message` exactly.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Select how the raised type is compared. Defaults to [`TypeMatch::Exact`].
    pub fn policy(mut self, policy: TypeMatch) -> Self {
        self.policy = policy;
        self
    }

    /// Name of the expected type, or `panic` for panic expectations.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            Kind::Error { type_name, .. } => type_name,
            Kind::Panic => PANIC_TYPE_NAME,
        }
    }

    /// The expected message, if one was configured.
    #[must_use]
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    /// The configured type-matching policy.
    #[must_use]
    pub fn type_match(&self) -> TypeMatch { self.policy }

    /// Classify what a unit raised against this expectation.
    ///
    /// `outcome` is `None` when the unit completed normally.
    ///
    /// # Errors
    ///
    /// Returns the [`ExpectationFailure`] describing why the expectation did
    /// not hold.
    pub fn classify(&self, outcome: Option<Raised>) -> Result<(), ExpectationFailure> {
        let result = self.classify_inner(outcome);
        metrics::record_expectation(result.as_ref().err());
        result
    }

    fn classify_inner(&self, outcome: Option<Raised>) -> Result<(), ExpectationFailure> {
        let Some(raised) = outcome else {
            return Err(ExpectationFailure::NoErrorRaised {
                expected: self.type_name(),
            });
        };
        let Some(actual) = self.matching_message(&raised) else {
            return Err(ExpectationFailure::TypeMismatch {
                expected: self.type_name(),
                actual: raised.type_name().to_owned(),
                message: raised.message(),
            });
        };
        match &self.message {
            Some(expected) if *expected != actual => Err(ExpectationFailure::MessageMismatch {
                type_name: self.type_name(),
                expected: expected.clone(),
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Message of the raised value that matches the expected type, if any.
    fn matching_message(&self, raised: &Raised) -> Option<String> {
        match (self.kind, raised) {
            (Kind::Panic, Raised::Panic(panic)) => Some(panic.as_str().to_owned()),
            (Kind::Error { is_type: matches, .. }, Raised::Error { .. }) => {
                let error = raised.error()?;
                match self.policy {
                    TypeMatch::Exact => matches(error).then(|| error.to_string()),
                    TypeMatch::SourceChain => iter::successors(Some(error), |&e| e.source())
                        .find(|e| matches(*e))
                        .map(ToString::to_string),
                }
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ExpectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectedError")
            .field("type_name", &self.type_name())
            .field("message", &self.message)
            .field("policy", &self.policy)
            .finish()
    }
}

impl fmt::Display for ExpectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.type_name())?;
        if let Some(message) = &self.message {
            write!(f, " with message \"{message}\"")?;
        }
        Ok(())
    }
}
