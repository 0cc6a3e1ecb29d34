use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{AssessmentId, AssessmentInput, AssessmentSubmission};
use super::evaluation::{EligibilityConfig, EligibilityEngine, EligibilityError, Recommendation};
use super::repository::{AssessmentRecord, AssessmentStore, NewAssessment, StoreError};

/// Service composing the eligibility engine with the persistence collaborator.
pub struct AssessmentService<S> {
    store: Arc<S>,
    engine: Arc<EligibilityEngine>,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>, config: EligibilityConfig) -> Self {
        Self {
            store,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Evaluate without persisting anything.
    pub fn assess(&self, input: &AssessmentInput) -> Result<Recommendation, AssessmentServiceError> {
        Ok(self.engine.evaluate(input)?)
    }

    /// Evaluate a completed questionnaire and persist it. Store failures are surfaced as-is;
    /// retrying is left to the caller.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let AssessmentSubmission {
            respondent_name,
            mut input,
        } = submission;
        input.dedup_conditions();

        let missing = input.missing_answers();
        if !missing.is_empty() {
            return Err(AssessmentServiceError::Incomplete { missing });
        }

        let recommendation = self.engine.evaluate(&input)?;

        let record = self
            .store
            .insert(NewAssessment {
                respondent_name,
                input,
                recommendation,
            })
            .map_err(|err| {
                warn!(error = %err, "failed to persist assessment");
                err
            })?;

        info!(
            id = %record.id,
            verdict = ?record.recommendation_detail.verdict,
            rule = ?record.recommendation_detail.rule,
            "assessment recorded"
        );

        Ok(record)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.store
            .fetch(id)?
            .ok_or_else(|| AssessmentServiceError::NotFound(id.clone()))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error("assessment is incomplete, missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("assessment {0} not found")]
    NotFound(AssessmentId),
}
