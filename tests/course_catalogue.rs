//! End-to-end expectations against the course catalogue double.
//!
//! Every test receives its own service built from a fresh store.

use proptest::prelude::*;
use raises::{
    CaseFailure,
    ExpectationFailure,
    ExpectedError,
    Suite,
    TestCase,
    Verdict,
    assert_raises,
    check,
};
use raises_testing::{
    CourseInstanceBuilder,
    CourseInstanceService,
    DuplicateIdError,
    INVALID_COURSEINSTANCE_ID,
    InMemoryStore,
    InvalidIdError,
    NotFoundError,
    TestResult,
    course_instance_strategy,
    course_instances,
    empty_service,
    invalid_course_instance,
    seeded_service,
};
use rstest::rstest;

type Service = CourseInstanceService<InMemoryStore>;

#[rstest]
fn unknown_id_on_empty_store_raises_not_found(empty_service: Service) {
    assert_eq!(
        check(&invalid_course_instance(), || empty_service.find(1337)),
        Ok(())
    );
}

#[rstest]
fn existing_id_fails_the_expectation(seeded_service: Service) {
    let failure = check(&invalid_course_instance(), || seeded_service.find(2))
        .expect_err("id 2 is seeded");
    assert!(matches!(failure, ExpectationFailure::NoErrorRaised { .. }));
}

#[rstest]
fn wrong_message_fails_the_expectation(empty_service: Service) {
    let expected = ExpectedError::of::<NotFoundError>().with_message("NOT_FOUND");
    let failure = check(&expected, || empty_service.find(1337)).expect_err("message differs");
    assert_eq!(
        failure,
        ExpectationFailure::MessageMismatch {
            type_name: std::any::type_name::<NotFoundError>(),
            expected: "NOT_FOUND".into(),
            actual: INVALID_COURSEINSTANCE_ID.into(),
        }
    );
}

#[rstest]
fn invalid_id_is_a_different_type(empty_service: Service) {
    let failure =
        check(&invalid_course_instance(), || empty_service.find(-1)).expect_err("wrong type");
    match failure {
        ExpectationFailure::TypeMismatch {
            expected,
            actual,
            message,
        } => {
            assert_eq!(expected, std::any::type_name::<NotFoundError>());
            assert_eq!(actual, "InvalidIdError");
            assert_eq!(message, "INVALID_ID");
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}

#[rstest]
fn type_mismatch_reason_names_the_boxed_type(empty_service: Service) {
    let reason = check(&invalid_course_instance(), || empty_service.find(0))
        .expect_err("zero is not a valid id")
        .to_string();
    assert!(reason.contains("NotFoundError"), "{reason}");
    assert!(reason.contains("got `InvalidIdError`"), "{reason}");
    assert!(!reason.contains("Box<dyn"), "{reason}");
}

#[rstest]
fn macro_form_reads_like_a_test_attribute(mut empty_service: Service) -> TestResult {
    empty_service.create(CourseInstanceBuilder::default().with_id(7).build())?;
    assert_raises!(
        || empty_service.create(CourseInstanceBuilder::default().with_id(7).build()),
        DuplicateIdError,
        "DUPLICATE_COURSEINSTANCE_ID",
    );
    assert_raises!(|| empty_service.find(0), InvalidIdError);
    Ok(())
}

#[test]
fn suite_builds_a_fresh_service_per_case() {
    let suite = Suite::new("course catalogue", || {
        CourseInstanceService::new(InMemoryStore::with_instances(course_instances(2)))
    })
    .case(
        TestCase::new("create_with_seeded_id", |mut service: Service| {
            service.create(CourseInstanceBuilder::default().with_id(1).build())
        })
        .expect_error(ExpectedError::of::<DuplicateIdError>()),
    )
    .case(TestCase::new("create_new_id", |mut service: Service| {
        service.create(CourseInstanceBuilder::default().with_id(3).build())
    }))
    .case(TestCase::new("store_is_untouched", |service: Service| {
        assert_eq!(service.find(3).ok(), None);
    }))
    .case(
        TestCase::new("lookup_1337", |service: Service| service.find(1337))
            .expect_error(invalid_course_instance()),
    );
    assert_eq!(suite.len(), 4);

    let report = suite.run();
    assert!(report.is_success(), "{report}");
    assert_eq!(report.passed(), 4);
    let names: Vec<_> = report.cases().iter().map(raises::CaseReport::name).collect();
    assert_eq!(
        names,
        ["create_with_seeded_id", "create_new_id", "store_is_untouched", "lookup_1337"]
    );
}

#[test]
fn suite_reports_expectation_failures_with_reasons() {
    let report = Suite::new("catalogue", || {
        CourseInstanceService::new(InMemoryStore::with_instances(course_instances(1)))
    })
    .case(
        TestCase::new("seeded_lookup", |service: Service| service.find(1))
            .expect_error(invalid_course_instance()),
    )
    .case(
        TestCase::new("after_failure", |service: Service| service.find(99))
            .expect_error(invalid_course_instance()),
    )
    .fail_fast(true)
    .run();

    let seeded = report.case("seeded_lookup").map(raises::CaseReport::verdict);
    assert_eq!(
        seeded,
        Some(&Verdict::Failed(CaseFailure::Expectation(
            ExpectationFailure::NoErrorRaised {
                expected: std::any::type_name::<NotFoundError>(),
            }
        )))
    );
    assert_eq!(report.skipped(), 1);
    assert!(report.to_string().contains("FAIL seeded_lookup"));
}

proptest! {
    #[test]
    fn stored_instances_never_raise_not_found(instance in course_instance_strategy()) {
        let id = instance.id;
        let service = CourseInstanceService::new(InMemoryStore::with_instances([instance]));
        let held = check(&invalid_course_instance(), || service.find(id));
        prop_assert!(
            matches!(held, Err(ExpectationFailure::NoErrorRaised { .. })),
            "lookup of stored id {} raised",
            id
        );
        prop_assert!(check(&invalid_course_instance(), || service.find(id + 1)).is_ok());
    }
}
