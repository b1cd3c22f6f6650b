//! Assertion macros for use inside `#[test]` functions.

/// Run a unit and panic with the failure reason unless it raises as expected.
///
/// The unit is any closure accepted by [`check`](crate::check). The second
/// argument is either an error type or the keyword `panic`; an optional third
/// argument is the exact expected message.
///
/// ```
/// use raises::assert_raises;
///
/// assert_raises!(|| "x".parse::<u8>(), std::num::ParseIntError);
/// assert_raises!(
///     || "".parse::<u8>(),
///     std::num::ParseIntError,
///     "cannot parse integer from empty string"
/// );
/// assert_raises!(
///     || {
///         Vec::<u8>::new().remove(0);
///     },
///     panic
/// );
/// ```
#[macro_export]
macro_rules! assert_raises {
    (@check $unit:expr, $expected:expr) => {{
        let expected = $expected;
        if let ::std::result::Result::Err(failure) = $crate::check(&expected, $unit) {
            ::std::panic!("assertion failed at {}:{}: {}", file!(), line!(), failure);
        }
    }};
    ($unit:expr, panic $(,)?) => {
        $crate::assert_raises!(@check $unit, $crate::ExpectedError::panic())
    };
    ($unit:expr, panic, $message:expr $(,)?) => {
        $crate::assert_raises!(
            @check $unit,
            $crate::ExpectedError::panic().with_message($message)
        )
    };
    ($unit:expr, $ty:ty $(,)?) => {
        $crate::assert_raises!(@check $unit, $crate::ExpectedError::of::<$ty>())
    };
    ($unit:expr, $ty:ty, $message:expr $(,)?) => {
        $crate::assert_raises!(
            @check $unit,
            $crate::ExpectedError::of::<$ty>().with_message($message)
        )
    };
}
