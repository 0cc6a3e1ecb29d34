use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentInput};
use super::evaluation::Recommendation;

/// Evaluated assessment handed to the store, before an identity is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub respondent_name: Option<String>,
    pub input: AssessmentInput,
    pub recommendation: Recommendation,
}

/// Stored assessment. Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_name: Option<String>,
    pub input: AssessmentInput,
    /// Verdict headline at the time of persistence.
    pub recommendation: String,
    pub reason: String,
    pub recommendation_detail: Recommendation,
    pub recorded_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn from_new(id: AssessmentId, assessment: NewAssessment, recorded_at: DateTime<Utc>) -> Self {
        let NewAssessment {
            respondent_name,
            input,
            recommendation,
        } = assessment;

        Self {
            id,
            respondent_name,
            input,
            recommendation: recommendation.verdict.headline().to_string(),
            reason: recommendation.reason.clone(),
            recommendation_detail: recommendation,
            recorded_at,
        }
    }
}

/// Persistence collaborator. Implementations assign the record identity.
pub trait AssessmentStore: Send + Sync {
    fn insert(&self, assessment: NewAssessment) -> Result<AssessmentRecord, StoreError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result shape returned to callers after a save attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAssessmentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssessmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveAssessmentResponse {
    pub fn saved(record: &AssessmentRecord) -> Self {
        Self {
            success: true,
            id: Some(record.id.clone()),
            recommendation: Some(record.recommendation_detail.clone()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            recommendation: None,
            error: Some(error.into()),
        }
    }
}
