use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use vaccine_screen::workflows::assessment::{
    AssessmentId, AssessmentRecord, AssessmentStore, ConditionTag, Gender, NewAssessment,
    StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local assessment store. Identities are sequential per process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryAssessmentStore {
    fn next_id(&self) -> AssessmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        AssessmentId(format!("asm-{id:06}"))
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("assessment store lock poisoned".to_string()))?;

        let id = self.next_id();
        let record = AssessmentRecord::from_new(id.clone(), assessment, Utc::now());
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("assessment store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw)
        .ok_or_else(|| format!("unknown gender '{raw}' (expected male, female or unspecified)"))
}

pub(crate) fn parse_condition(raw: &str) -> Result<ConditionTag, String> {
    ConditionTag::from_id(raw).ok_or_else(|| {
        let known: Vec<&str> = ConditionTag::CATALOG.iter().map(|tag| tag.id()).collect();
        format!("unknown condition '{raw}' (expected one of {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaccine_screen::workflows::assessment::{EligibilityEngine, AssessmentInput};

    fn new_assessment() -> NewAssessment {
        let input = AssessmentInput {
            age: Some(22),
            gender: Some(Gender::Male),
            prior_exposure: Some(true),
            conditions: vec![ConditionTag::None],
        };
        let recommendation = EligibilityEngine::default()
            .evaluate(&input)
            .expect("valid input");
        NewAssessment {
            respondent_name: None,
            input,
            recommendation,
        }
    }

    #[test]
    fn store_assigns_sequential_ids() {
        let store = InMemoryAssessmentStore::default();

        let first = store.insert(new_assessment()).expect("insert");
        let second = store.insert(new_assessment()).expect("insert");

        assert_eq!(first.id.0, "asm-000001");
        assert_eq!(second.id.0, "asm-000002");
        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch(&first.id).expect("fetch"), Some(first));
    }

    #[test]
    fn parses_cli_condition_ids() {
        assert_eq!(parse_condition("hiv-low-cd4"), Ok(ConditionTag::HivLowCd4));
        assert_eq!(parse_condition("MEDICAL_STAFF"), Ok(ConditionTag::MedicalStaff));
        assert!(parse_condition("hajj").is_err());
        assert_eq!(parse_gender("F"), Ok(Gender::Female));
    }
}
