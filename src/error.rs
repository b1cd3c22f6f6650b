//! Failure taxonomy for expectation checks.
//!
//! Every variant's `Display` output is the human-readable reason reported to
//! the enclosing test runner. Checking an expectation never panics; a failed
//! expectation is returned as one of these values.

use thiserror::Error;

/// Why an [`ExpectedError`](crate::ExpectedError) did not hold.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpectationFailure {
    /// The unit completed without returning an error or panicking.
    #[error("expected error of type `{expected}` was not raised")]
    NoErrorRaised {
        /// Name of the expected type.
        expected: &'static str,
    },

    /// The unit raised something other than the expected type.
    #[error("expected error of type `{expected}`, got `{actual}`: {message}")]
    TypeMismatch {
        /// Name of the expected type.
        expected: &'static str,
        /// Name of the raised type.
        actual: String,
        /// Message carried by the raised value.
        message: String,
    },

    /// The type matched but the message did not.
    #[error("`{type_name}` raised with message \"{actual}\", expected \"{expected}\"")]
    MessageMismatch {
        /// Name of the matched type.
        type_name: &'static str,
        /// Message the expectation was configured with.
        expected: String,
        /// Message actually raised.
        actual: String,
    },
}

impl ExpectationFailure {
    /// Short, stable label for the failure category.
    ///
    /// Used as a metric label and in log records.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoErrorRaised { .. } => "no_error_raised",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MessageMismatch { .. } => "message_mismatch",
        }
    }
}

/// Why a suite case failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CaseFailure {
    /// The case declared an expectation that did not hold.
    #[error(transparent)]
    Expectation(#[from] ExpectationFailure),

    /// The case declared no expectation but its body raised.
    #[error("unexpected `{type_name}` raised: {message}")]
    Unexpected {
        /// Name of the raised type.
        type_name: String,
        /// Message carried by the raised value.
        message: String,
    },

    /// The setup hook panicked, so the body never ran.
    #[error("setup hook panicked: {message}")]
    SetupPanicked {
        /// Rendered panic payload.
        message: String,
    },
}
