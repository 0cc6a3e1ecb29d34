//! Dengue vaccine eligibility questionnaire: condition selection, rule-based evaluation, the
//! three-step wizard and persistence of completed assessments.

pub mod domain;
pub(crate) mod evaluation;
pub mod repository;
pub mod router;
pub mod selection;
pub mod service;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    condition_catalog, AssessmentId, AssessmentInput, AssessmentSubmission, ConditionDescriptor,
    ConditionKind, ConditionTag, Gender,
};
pub use evaluation::{
    DecisionRule, EligibilityConfig, EligibilityEngine, EligibilityError, Recommendation,
    RuleTable, Severity, Verdict,
};
pub use repository::{
    AssessmentRecord, AssessmentStore, NewAssessment, SaveAssessmentResponse, StoreError,
};
pub use router::{assessment_router, ToggleRequest, ToggleResponse};
pub use selection::ConditionSelection;
pub use service::{AssessmentService, AssessmentServiceError};
pub use wizard::{AssessmentWizard, WizardError, WizardStep};
