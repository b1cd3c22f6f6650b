//! Shared fixtures for testing with `raises`.
//!
//! Provides a serialised log-capture handle, a small course catalogue used as
//! a system under test, and builders for its test data.
//!
//! ```
//! use raises::check;
//! use raises_testing::{empty_service, invalid_course_instance};
//!
//! let service = empty_service();
//! assert_eq!(check(&invalid_course_instance(), || service.find(1337)), Ok(()));
//! ```

pub mod builders;
pub mod catalogue;
pub mod logging;

pub use builders::{CourseInstanceBuilder, course_instance_strategy, course_instances};
pub use catalogue::{
    CourseInstance,
    CourseInstanceService,
    CourseInstanceStore,
    DUPLICATE_COURSEINSTANCE_ID,
    DuplicateIdError,
    INVALID_COURSEINSTANCE_ID,
    INVALID_ID,
    InMemoryStore,
    InvalidIdError,
    NotFoundError,
    empty_service,
    invalid_course_instance,
    seeded_service,
};
pub use logging::{LogCapture, log_capture};

/// Shared result type for integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
