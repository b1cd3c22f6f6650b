#![doc(html_root_url = "https://docs.rs/raises/latest")]
//! Expected-error assertions for unit tests.
//!
//! A unit under test raises either by returning `Err` or by panicking. An
//! [`ExpectedError`] names the type (and optionally the exact message) that
//! must be raised; [`check`] runs the unit once and reports a structured
//! [`ExpectationFailure`] when the expectation does not hold. [`Suite`] and
//! [`TestCase`] attach expectations to test descriptors with a per-case
//! setup hook.
//!
//! ```
//! use raises::{ExpectationFailure, ExpectedError, check};
//!
//! let expected = ExpectedError::of::<std::num::ParseIntError>()
//!     .with_message("invalid digit found in string");
//! assert_eq!(check(&expected, || "1337x".parse::<u32>()), Ok(()));
//!
//! let failure = check(&expected, || "1337".parse::<u32>()).unwrap_err();
//! assert!(matches!(failure, ExpectationFailure::NoErrorRaised { .. }));
//! ```
//!
//! Panics are caught with [`std::panic::catch_unwind`], so the crate must be
//! built with `panic = "unwind"` (the default for test profiles). Caught
//! panics still pass through the installed panic hook, so an expected panic
//! prints its message to stderr like any other.
//!
//! Units returning errors that are not `Send + Sync`, such as
//! `Box<dyn Error>`, are wrapped with [`local`].

mod macros;

pub mod error;
pub mod expected;
pub mod matcher;
pub mod metrics;
pub mod panic;
pub mod raised;
pub mod report;
pub mod suite;

pub use error::{CaseFailure, ExpectationFailure};
pub use expected::{ExpectedError, TypeMatch};
pub use matcher::{capture, capture_async, check, check_async};
pub use panic::PanicMessage;
pub use raised::{BoxError, Local, LocalError, Raised, UnitResult, local};
pub use report::{CaseReport, Report, SkipReason, Verdict};
pub use suite::{Suite, TestCase};
