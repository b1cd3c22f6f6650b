//! Captured failures of a unit under test.
//!
//! [`Raised`] records what a unit produced instead of completing normally:
//! either an error value together with the name of its type, or a panic
//! payload. [`UnitResult`] converts a unit's return value into an optional
//! [`Raised`].

use std::{any::type_name, borrow::Cow, error::Error, fmt, io};

use crate::panic::PanicMessage;

/// Boxed, thread-safe error type accepted from `Result`-returning units.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Boxed error type with no thread-safety bounds, accepted through [`local`].
pub type LocalError = Box<dyn Error + 'static>;

/// Type name reported for panics.
pub const PANIC_TYPE_NAME: &str = "panic";

/// Something a unit under test raised.
pub enum Raised {
    /// The unit returned `Err`.
    Error {
        /// Name of the raised error type.
        ///
        /// For errors returned behind `Box<dyn Error>` this names the boxed
        /// value rather than the box.
        type_name: Cow<'static, str>,
        /// The error value.
        error: LocalError,
    },
    /// The unit panicked.
    Panic(PanicMessage),
}

impl Raised {
    /// Capture an error value, remembering its type name.
    ///
    /// ```
    /// use raises::{BoxError, Raised};
    ///
    /// let raised = Raised::from_error(std::io::Error::other("gone"));
    /// assert_eq!(raised.type_name(), "std::io::error::Error");
    /// assert_eq!(raised.message(), "gone");
    ///
    /// let boxed: BoxError = Box::new(std::io::Error::other("gone"));
    /// assert_eq!(Raised::from_error(boxed).type_name(), "std::io::error::Error");
    /// ```
    pub fn from_error<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let boxed: BoxError = error.into();
        Self::from_boxed(type_name::<E>(), boxed)
    }

    /// Capture an error value that is not `Send + Sync`.
    pub fn from_local_error<E>(error: E) -> Self
    where
        E: Into<LocalError>,
    {
        Self::from_boxed(type_name::<E>(), error.into())
    }

    fn from_boxed(static_name: &'static str, error: LocalError) -> Self {
        Self::Error {
            type_name: dynamic_type_name(static_name, error.as_ref()),
            error,
        }
    }

    /// Name of the raised type, or [`PANIC_TYPE_NAME`] for panics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Error { type_name, .. } => &**type_name,
            Self::Panic(_) => PANIC_TYPE_NAME,
        }
    }

    /// The raised message: the error's `Display` output or the panic payload.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Error { error, .. } => error.to_string(),
            Self::Panic(panic) => panic.as_str().to_owned(),
        }
    }

    /// The raised error value, if the unit returned `Err`.
    #[must_use]
    pub fn error(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Error { error, .. } => {
                let error: &(dyn Error + 'static) = &**error;
                Some(error)
            }
            Self::Panic(_) => None,
        }
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error { type_name, error } => f
                .debug_struct("Error")
                .field("type_name", type_name)
                .field("error", error)
                .finish(),
            Self::Panic(panic) => f.debug_tuple("Panic").field(panic).finish(),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.type_name(), self.message())
    }
}

/// Name the value behind a boxed trait object.
///
/// `std::any::type_name` only sees the box, so the name is recovered from the
/// value: `io::Error` by downcast, anything else from the head of its `Debug`
/// rendering, which is the type name for derived structs and the variant name
/// for derived enums. Values whose `Debug` output does not start with an
/// identifier keep the static name.
fn dynamic_type_name(static_name: &'static str, error: &(dyn Error + 'static)) -> Cow<'static, str> {
    if !static_name.starts_with("alloc::boxed::Box<dyn ") {
        return Cow::Borrowed(static_name);
    }
    if error.is::<io::Error>() {
        return Cow::Borrowed(type_name::<io::Error>());
    }
    let rendered = format!("{error:?}");
    let head: String = rendered
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if head.is_empty() || head.starts_with(|c: char| c.is_ascii_digit()) {
        Cow::Borrowed(static_name)
    } else {
        Cow::Owned(head)
    }
}

/// Return values a unit under test may produce.
///
/// Implemented for `()` (a unit that can only raise by panicking), for
/// `Result<T, E>` where the error converts into a [`BoxError`], and for
/// [`Local`]. The `Ok` value is discarded.
pub trait UnitResult {
    /// `Some` if the return value represents a raised error.
    fn into_raised(self) -> Option<Raised>;
}

impl UnitResult for () {
    fn into_raised(self) -> Option<Raised> { None }
}

impl<T, E> UnitResult for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_raised(self) -> Option<Raised> { self.err().map(Raised::from_error) }
}

/// Outcome of a unit whose error type is not `Send + Sync`.
#[must_use]
pub struct Local(Option<Raised>);

/// Adapt a `Result` whose error is not `Send + Sync` for use as a unit result.
///
/// `Box<dyn Error>` and errors holding an `Rc` or `Cell` do not convert into
/// a [`BoxError`], so `check` rejects them directly:
///
/// ```compile_fail
/// use raises::{ExpectedError, check};
///
/// let expected = ExpectedError::of::<std::num::ParseIntError>();
/// let _ = check(&expected, || -> Result<u8, Box<dyn std::error::Error>> {
///     Ok("z".parse()?)
/// });
/// ```
///
/// Wrapping the result with `local` accepts them:
///
/// ```
/// use raises::{ExpectedError, check, local};
///
/// let expected = ExpectedError::of::<std::num::ParseIntError>();
/// let unit = || -> Result<u8, Box<dyn std::error::Error>> { Ok("z".parse()?) };
/// assert_eq!(check(&expected, || local(unit())), Ok(()));
/// ```
pub fn local<T, E>(result: Result<T, E>) -> Local
where
    E: Into<LocalError>,
{
    Local(result.err().map(Raised::from_local_error))
}

impl UnitResult for Local {
    fn into_raised(self) -> Option<Raised> { self.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_values_are_not_raised() {
        assert!(Ok::<u8, io::Error>(3).into_raised().is_none());
        assert!(().into_raised().is_none());
    }

    #[test]
    fn boxed_errors_keep_concrete_value() {
        let boxed: BoxError = Box::new(io::Error::other("gone"));
        let raised = Err::<(), _>(boxed)
            .into_raised()
            .expect("error should be raised");
        let error = raised.error().expect("error value present");
        assert!(error.is::<io::Error>());
        assert_eq!(raised.type_name(), "std::io::error::Error");
    }

    #[derive(Debug)]
    struct Unsendable(std::rc::Rc<str>);

    impl fmt::Display for Unsendable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
    }

    impl Error for Unsendable {}

    #[test]
    fn boxed_errors_are_named_by_their_value() {
        let local: LocalError = Box::new(Unsendable(std::rc::Rc::from("shared")));
        let raised = super::local(Err::<(), _>(local))
            .into_raised()
            .expect("error should be raised");
        assert_eq!(raised.type_name(), "Unsendable");
        assert_eq!(raised.message(), "shared");
    }

    #[test]
    fn boxed_strings_keep_the_static_name() {
        let boxed: BoxError = "plain".into();
        let raised = Raised::from_error(boxed);
        assert!(raised.type_name().starts_with("alloc::boxed::Box<dyn"));
        assert_eq!(raised.message(), "plain");
    }

    #[test]
    fn panic_reports_panic_type() {
        let raised = Raised::Panic(PanicMessage::from_payload(Box::new("boom")));
        assert_eq!(raised.type_name(), PANIC_TYPE_NAME);
        assert_eq!(raised.to_string(), "`panic`: boom");
        assert!(raised.error().is_none());
    }
}
