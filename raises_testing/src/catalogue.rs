//! In-memory course catalogue used as the system under test in examples and
//! integration tests.
//!
//! [`CourseInstanceService`] owns its store, so each test builds a fresh
//! service from a fresh store. Failures are returned as boxed errors of
//! distinct concrete types, which is what expectation checks inspect.

use std::collections::BTreeMap;

use raises::{BoxError, ExpectedError};
use rstest::fixture;
use thiserror::Error;

use crate::builders::course_instances;

/// Message of [`NotFoundError`].
pub const INVALID_COURSEINSTANCE_ID: &str = "INVALID_COURSEINSTANCE_ID";
/// Message of [`InvalidIdError`].
pub const INVALID_ID: &str = "INVALID_ID";
/// Message of [`DuplicateIdError`].
pub const DUPLICATE_COURSEINSTANCE_ID: &str = "DUPLICATE_COURSEINSTANCE_ID";

/// A scheduled run of a course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseInstance {
    pub id: i64,
    pub course_code: String,
    pub term: String,
    pub capacity: u32,
}

/// No course instance exists with the requested id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("INVALID_COURSEINSTANCE_ID")]
pub struct NotFoundError {
    pub id: i64,
}

/// The id is not a positive integer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("INVALID_ID")]
pub struct InvalidIdError {
    pub id: i64,
}

/// A course instance with the same id already exists.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("DUPLICATE_COURSEINSTANCE_ID")]
pub struct DuplicateIdError {
    pub id: i64,
}

/// Data-access seam of the catalogue.
pub trait CourseInstanceStore {
    /// Fetch a course instance by id.
    fn get(&self, id: i64) -> Option<CourseInstance>;

    /// Store `instance`; returns `false` if its id is already taken.
    fn insert(&mut self, instance: CourseInstance) -> bool;

    /// Number of stored instances.
    fn len(&self) -> usize;

    /// `true` if nothing is stored.
    fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Store double backed by an ordered map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    rows: BTreeMap<i64, CourseInstance>,
}

impl InMemoryStore {
    /// A store preloaded with `instances`; later duplicates are ignored.
    pub fn with_instances(instances: impl IntoIterator<Item = CourseInstance>) -> Self {
        let mut store = Self::default();
        for instance in instances {
            store.insert(instance);
        }
        store
    }
}

impl CourseInstanceStore for InMemoryStore {
    fn get(&self, id: i64) -> Option<CourseInstance> { self.rows.get(&id).cloned() }

    fn insert(&mut self, instance: CourseInstance) -> bool {
        if self.rows.contains_key(&instance.id) {
            return false;
        }
        self.rows.insert(instance.id, instance);
        true
    }

    fn len(&self) -> usize { self.rows.len() }
}

/// Catalogue operations over an owned store.
#[derive(Debug)]
pub struct CourseInstanceService<S> {
    store: S,
}

impl<S: CourseInstanceStore> CourseInstanceService<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self { Self { store } }

    /// Look up a course instance.
    ///
    /// # Errors
    ///
    /// [`InvalidIdError`] for non-positive ids, [`NotFoundError`] for ids
    /// with no stored instance.
    pub fn find(&self, id: i64) -> Result<CourseInstance, BoxError> {
        if id <= 0 {
            return Err(InvalidIdError { id }.into());
        }
        self.store
            .get(id)
            .ok_or_else(|| NotFoundError { id }.into())
    }

    /// Add a course instance and return its id.
    ///
    /// # Errors
    ///
    /// [`InvalidIdError`] for non-positive ids, [`DuplicateIdError`] if the id
    /// is taken.
    pub fn create(&mut self, instance: CourseInstance) -> Result<i64, BoxError> {
        let id = instance.id;
        if id <= 0 {
            return Err(InvalidIdError { id }.into());
        }
        if !self.store.insert(instance) {
            return Err(DuplicateIdError { id }.into());
        }
        Ok(id)
    }

    /// The underlying store.
    pub fn store(&self) -> &S { &self.store }
}

/// Service over an empty store.
#[fixture]
pub fn empty_service() -> CourseInstanceService<InMemoryStore> {
    CourseInstanceService::new(InMemoryStore::default())
}

/// Service over a store holding `course_instances(3)` (ids 1 to 3).
#[fixture]
pub fn seeded_service() -> CourseInstanceService<InMemoryStore> {
    CourseInstanceService::new(InMemoryStore::with_instances(course_instances(3)))
}

/// The failure raised when looking up an id the catalogue does not hold.
pub fn invalid_course_instance() -> ExpectedError {
    ExpectedError::of::<NotFoundError>().with_message(INVALID_COURSEINSTANCE_ID)
}
