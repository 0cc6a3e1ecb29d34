use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::workflows::assessment::domain::{
    AssessmentId, AssessmentInput, AssessmentSubmission, ConditionTag, Gender,
};
use crate::workflows::assessment::evaluation::{EligibilityConfig, EligibilityEngine, RuleTable};
use crate::workflows::assessment::repository::{
    AssessmentRecord, AssessmentStore, NewAssessment, StoreError,
};
use crate::workflows::assessment::service::AssessmentService;

pub(super) fn extended_engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn minimal_engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig {
        rule_table: RuleTable::Minimal,
        ..EligibilityConfig::default()
    })
}

pub(super) fn input(age: i32, prior_exposure: Option<bool>, conditions: &[ConditionTag]) -> AssessmentInput {
    AssessmentInput {
        age: Some(age),
        gender: Some(Gender::Female),
        prior_exposure,
        conditions: conditions.to_vec(),
    }
}

pub(super) fn submission() -> AssessmentSubmission {
    AssessmentSubmission {
        respondent_name: Some("Somchai".to_string()),
        input: input(28, Some(true), &[ConditionTag::None]),
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<HashMap<AssessmentId, AssessmentRecord>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl AssessmentStore for MemoryStore {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentRecord, StoreError> {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = AssessmentId(format!("asm-{next:06}"));
        let recorded_at = Utc
            .with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let record = AssessmentRecord::from_new(id.clone(), assessment, recorded_at);

        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Store that fails every call and counts how often it was asked to insert.
#[derive(Default)]
pub(super) struct UnavailableStore {
    pub(super) attempts: AtomicU64,
}

impl AssessmentStore for UnavailableStore {
    fn insert(&self, _assessment: NewAssessment) -> Result<AssessmentRecord, StoreError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(StoreError::Unavailable("database connection refused".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(AssessmentService::new(
        store.clone(),
        EligibilityConfig::default(),
    ));
    (service, store)
}
