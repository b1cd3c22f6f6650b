//! Panic payload rendering.
//!
//! A panicking unit "raises" its payload. The payload is rendered once, at
//! capture time, so the resulting [`PanicMessage`] can be compared, cloned and
//! sent across threads without holding on to the `Box<dyn Any>`.

use std::{any::Any, fmt};

/// Rendered text of a `panic!` payload.
///
/// The payload is downcast to `String` or `&'static str` if possible and falls
/// back to a placeholder naming the opaque payload otherwise.
///
/// ```
/// use raises::panic::PanicMessage;
/// assert_eq!(PanicMessage::from_payload(Box::new("boom")).as_str(), "boom");
/// assert_eq!(
///     PanicMessage::from_payload(Box::new(String::from("boom"))).as_str(),
///     "boom"
/// );
/// assert_eq!(
///     PanicMessage::from_payload(Box::new(5_u32)).as_str(),
///     "<non-string panic payload>"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct PanicMessage(String);

/// Placeholder used when a payload is neither `String` nor `&'static str`.
pub const OPAQUE_PAYLOAD: &str = "<non-string panic payload>";

impl PanicMessage {
    /// Render the payload returned by [`std::panic::catch_unwind`].
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let text = payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| OPAQUE_PAYLOAD.to_owned());
        Self(text)
    }

    /// The rendered payload.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PanicMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
