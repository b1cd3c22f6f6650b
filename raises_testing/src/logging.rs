//! Serialised access to captured `log` records.
//!
//! `logtest` installs a process-wide logger, so tests inspecting records must
//! not run concurrently. [`LogCapture`] holds the global [`Logger`] behind a
//! mutex for the lifetime of the handle; pair it with `#[serial]`.

use std::{
    ops::{Deref, DerefMut},
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use log::Level;
use logtest::{Logger, Record};
use rstest::fixture;

/// Exclusive handle to the global captured logger.
pub struct LogCapture {
    guard: MutexGuard<'static, Logger>,
}

impl LogCapture {
    /// Acquire the global [`Logger`], discarding records left by earlier tests.
    ///
    /// A test that panicked while holding the handle does not poison later
    /// acquisitions.
    #[must_use]
    pub fn acquire() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let mut guard = logger.lock().unwrap_or_else(PoisonError::into_inner);
        while guard.pop().is_some() {}

        Self { guard }
    }

    /// Remove and return every captured record, oldest first.
    pub fn drain(&mut self) -> Vec<Record> { std::iter::from_fn(|| self.guard.pop()).collect() }

    /// `true` if a record at `level` whose message contains `needle` was
    /// captured. Inspected records are consumed.
    pub fn contains(&mut self, level: Level, needle: &str) -> bool {
        self.drain()
            .iter()
            .any(|record| record.level() == level && record.args().contains(needle))
    }
}

impl Deref for LogCapture {
    type Target = Logger;

    fn deref(&self) -> &Self::Target { &self.guard }
}

impl DerefMut for LogCapture {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.guard }
}

#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn log_capture() -> LogCapture { LogCapture::acquire() }
