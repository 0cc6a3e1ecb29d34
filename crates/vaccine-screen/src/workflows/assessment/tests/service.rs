use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::common::*;
use crate::workflows::assessment::domain::{AssessmentId, AssessmentSubmission, ConditionTag};
use crate::workflows::assessment::evaluation::{EligibilityConfig, EligibilityError, Verdict};
use crate::workflows::assessment::repository::{AssessmentStore, StoreError};
use crate::workflows::assessment::service::{AssessmentService, AssessmentServiceError};

#[test]
fn submit_persists_the_evaluated_assessment() {
    let (service, store) = build_service();

    let record = service.submit(submission()).expect("assessment saved");

    assert_eq!(record.id, AssessmentId("asm-000001".to_string()));
    assert_eq!(record.respondent_name.as_deref(), Some("Somchai"));
    assert_eq!(record.recommendation_detail.verdict, Verdict::Recommended);
    assert_eq!(record.recommendation, Verdict::Recommended.headline());
    assert_eq!(record.reason, record.recommendation_detail.reason);
    assert_eq!(record.input.conditions, vec![ConditionTag::None]);
    assert_eq!(store.len(), 1);

    let fetched = service.get(&record.id).expect("record fetched");
    assert_eq!(fetched, record);
}

#[test]
fn submit_stores_each_condition_once_in_first_seen_order() {
    let (service, store) = build_service();
    let mut repeated = submission();
    repeated.input.conditions = vec![
        ConditionTag::Pregnant,
        ConditionTag::MedicalStaff,
        ConditionTag::Pregnant,
        ConditionTag::MedicalStaff,
    ];

    let record = service.submit(repeated).expect("assessment saved");

    assert_eq!(
        record.input.conditions,
        vec![ConditionTag::Pregnant, ConditionTag::MedicalStaff]
    );
    assert_eq!(record.recommendation_detail.verdict, Verdict::NotRecommended);
    let stored = store
        .fetch(&record.id)
        .expect("store reachable")
        .expect("record present");
    assert_eq!(stored.input.conditions, record.input.conditions);
}

#[test]
fn submit_rejects_incomplete_answers_before_persisting() {
    let (service, store) = build_service();
    let mut incomplete = submission();
    incomplete.input.gender = None;
    incomplete.input.prior_exposure = None;

    let err = service.submit(incomplete).expect_err("incomplete rejected");

    match err {
        AssessmentServiceError::Incomplete { missing } => {
            assert_eq!(missing, vec!["gender", "prior_exposure"]);
        }
        other => panic!("expected incomplete error, got {other:?}"),
    }
    assert_eq!(store.len(), 0);
}

#[test]
fn submit_accepts_age_zero() {
    let (service, _) = build_service();
    let mut infant = submission();
    infant.input.age = Some(0);

    let record = service.submit(infant).expect("age zero is an answer");

    assert_eq!(record.recommendation_detail.verdict, Verdict::NotRecommended);
}

#[test]
fn submit_rejects_invalid_age() {
    let (service, store) = build_service();
    let mut invalid = submission();
    invalid.input.age = Some(-4);

    let err = service.submit(invalid).expect_err("negative age rejected");

    assert!(matches!(
        err,
        AssessmentServiceError::Eligibility(EligibilityError::InvalidInput { field: "age", .. })
    ));
    assert_eq!(store.len(), 0);
}

#[test]
fn store_failure_is_surfaced_without_retry() {
    let store = Arc::new(UnavailableStore::default());
    let service = AssessmentService::new(store.clone(), EligibilityConfig::default());

    let err = service.submit(submission()).expect_err("store failure surfaced");

    match err {
        AssessmentServiceError::Store(StoreError::Unavailable(message)) => {
            assert_eq!(message, "database connection refused");
        }
        other => panic!("expected store failure, got {other:?}"),
    }
    assert_eq!(store.attempts.load(Ordering::Relaxed), 1);
}

#[test]
fn assess_does_not_touch_the_store() {
    let (service, store) = build_service();

    let recommendation = service
        .assess(&input(50, Some(true), &[]))
        .expect("valid input");

    assert_eq!(recommendation.verdict, Verdict::ConsultDoctor);
    assert_eq!(store.len(), 0);
}

#[test]
fn get_reports_missing_records() {
    let (service, _) = build_service();
    let id = AssessmentId("asm-999999".to_string());

    let err = service.get(&id).expect_err("missing record");

    assert!(matches!(err, AssessmentServiceError::NotFound(missing) if missing == id));
}

#[test]
fn submission_without_name_round_trips_through_json() {
    let payload = r#"{"age": 12, "gender": "male", "prior_exposure": false, "conditions": ["medical_staff"]}"#;

    let submission: AssessmentSubmission = serde_json::from_str(payload).expect("payload parses");

    assert!(submission.respondent_name.is_none());
    assert_eq!(submission.input.age, Some(12));
    assert_eq!(submission.input.conditions, vec![ConditionTag::MedicalStaff]);
}
