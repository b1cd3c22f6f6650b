//! Test-data builders and generators for the course catalogue.
//!
//! Tests describe only the fields they care about and take defaults for the
//! rest:
//!
//! ```
//! use raises_testing::CourseInstanceBuilder;
//!
//! let instance = CourseInstanceBuilder::default().with_capacity(0).build();
//! assert_eq!(instance.capacity, 0);
//! assert_eq!(instance.course_code, "CS101");
//! ```

use proptest::{prelude::*, sample::select};

use crate::catalogue::CourseInstance;

const TERMS: [&str; 3] = ["spring", "summer", "autumn"];

/// Fluent builder for [`CourseInstance`] values.
#[derive(Clone, Debug)]
#[must_use]
pub struct CourseInstanceBuilder {
    id: i64,
    course_code: String,
    term: String,
    capacity: u32,
}

impl Default for CourseInstanceBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            course_code: "CS101".into(),
            term: "2024-autumn".into(),
            capacity: 30,
        }
    }
}

impl CourseInstanceBuilder {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_course_code(mut self, code: impl Into<String>) -> Self {
        self.course_code = code.into();
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn build(self) -> CourseInstance {
        CourseInstance {
            id: self.id,
            course_code: self.course_code,
            term: self.term,
            capacity: self.capacity,
        }
    }
}

/// `count` distinct instances with ids `1..=count` and codes `CS101`,
/// `CS102`, ...; terms cycle through the year.
#[must_use]
pub fn course_instances(count: usize) -> Vec<CourseInstance> {
    (1_i64..)
        .zip(TERMS.iter().cycle())
        .take(count)
        .map(|(id, term)| {
            CourseInstanceBuilder::default()
                .with_id(id)
                .with_course_code(format!("CS{}", 100 + id))
                .with_term(format!("2024-{term}"))
                .build()
        })
        .collect()
}

/// Arbitrary course instances with positive ids.
pub fn course_instance_strategy() -> impl Strategy<Value = CourseInstance> {
    (
        1_i64..100_000,
        "[A-Z]{2,4}[0-9]{3}",
        2000_u16..2100,
        select(TERMS.to_vec()),
        0_u32..1_000,
    )
        .prop_map(|(id, course_code, year, term, capacity)| CourseInstance {
            id,
            course_code,
            term: format!("{year}-{term}"),
            capacity,
        })
}
