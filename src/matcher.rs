//! Invoke a unit under test and check what it raised.
//!
//! [`check`] runs the unit exactly once, synchronously, on the calling thread.
//! Panics are caught so that a unit which panics unexpectedly is reported as
//! a [`TypeMismatch`](ExpectationFailure::TypeMismatch) instead of aborting
//! the surrounding test.

use std::{future::Future, panic::AssertUnwindSafe};

use futures::FutureExt as _;
use log::{debug, warn};

use crate::{
    error::ExpectationFailure,
    expected::ExpectedError,
    panic::PanicMessage,
    raised::{Raised, UnitResult},
};

/// Run `unit` once and capture anything it raised.
///
/// Returns `None` when the unit completed normally. A panic is caught after
/// the panic hook has run, so the default hook still reports it on stderr.
pub fn capture<F, R>(unit: F) -> Option<Raised>
where
    F: FnOnce() -> R,
    R: UnitResult,
{
    match std::panic::catch_unwind(AssertUnwindSafe(unit)) {
        Ok(result) => result.into_raised(),
        Err(payload) => Some(Raised::Panic(PanicMessage::from_payload(payload))),
    }
}

/// Await `unit` on the current task and capture anything it raised.
pub async fn capture_async<Fut>(unit: Fut) -> Option<Raised>
where
    Fut: Future,
    Fut::Output: UnitResult,
{
    match AssertUnwindSafe(unit).catch_unwind().await {
        Ok(result) => result.into_raised(),
        Err(payload) => Some(Raised::Panic(PanicMessage::from_payload(payload))),
    }
}

/// Run `unit` and check that it raises what `expected` describes.
///
/// ```
/// use raises::{ExpectedError, check};
///
/// let expected = ExpectedError::of::<std::num::ParseIntError>();
/// assert!(check(&expected, || "forty".parse::<u8>()).is_ok());
/// assert!(check(&expected, || "40".parse::<u8>()).is_err());
/// ```
///
/// # Errors
///
/// Returns an [`ExpectationFailure`] if nothing was raised, the raised type
/// does not match, or the message differs from the expected one.
pub fn check<F, R>(expected: &ExpectedError, unit: F) -> Result<(), ExpectationFailure>
where
    F: FnOnce() -> R,
    R: UnitResult,
{
    report(expected, capture(unit))
}

/// Await `unit` and check that it raises what `expected` describes.
///
/// The future is polled on the caller's task; nothing is spawned.
///
/// # Errors
///
/// Returns an [`ExpectationFailure`] under the same conditions as [`check`].
pub async fn check_async<Fut>(expected: &ExpectedError, unit: Fut) -> Result<(), ExpectationFailure>
where
    Fut: Future,
    Fut::Output: UnitResult,
{
    report(expected, capture_async(unit).await)
}

fn report(expected: &ExpectedError, outcome: Option<Raised>) -> Result<(), ExpectationFailure> {
    let result = expected.classify(outcome);
    match &result {
        Ok(()) => debug!("expectation held: expected={expected}"),
        Err(failure) => warn!(
            "expectation failed: kind={}, reason={failure}",
            failure.label()
        ),
    }
    result
}
