use serde::{Deserialize, Serialize};

use super::domain::{AssessmentInput, ConditionTag, Gender};
use super::evaluation::{EligibilityEngine, EligibilityError, Recommendation};
use super::selection::ConditionSelection;

/// Ordered steps of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInformation,
    MedicalConditions,
    Results,
}

impl WizardStep {
    pub const TOTAL: u8 = 3;

    pub const fn number(self) -> u8 {
        match self {
            WizardStep::BasicInformation => 1,
            WizardStep::MedicalConditions => 2,
            WizardStep::Results => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::BasicInformation => "Basic information",
            WizardStep::MedicalConditions => "Medical conditions",
            WizardStep::Results => "Results",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            WizardStep::BasicInformation => Some(WizardStep::MedicalConditions),
            WizardStep::MedicalConditions => Some(WizardStep::Results),
            WizardStep::Results => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            WizardStep::BasicInformation => None,
            WizardStep::MedicalConditions => Some(WizardStep::BasicInformation),
            WizardStep::Results => Some(WizardStep::MedicalConditions),
        }
    }
}

/// One respondent's pass through the questionnaire.
#[derive(Debug, Clone)]
pub struct AssessmentWizard {
    step: WizardStep,
    age: Option<i32>,
    gender: Option<Gender>,
    prior_exposure: Option<bool>,
    selection: ConditionSelection,
}

impl Default for AssessmentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::BasicInformation,
            age: None,
            gender: None,
            prior_exposure: None,
            selection: ConditionSelection::new(),
        }
    }

    /// Resume from answers captured in an earlier session. The session restarts at the first
    /// step.
    pub fn resume(input: AssessmentInput) -> Self {
        Self {
            step: WizardStep::BasicInformation,
            age: input.age,
            gender: input.gender,
            prior_exposure: input.prior_exposure,
            selection: ConditionSelection::from_tags(input.conditions),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn progress_percent(&self) -> u8 {
        let pct = f32::from(self.step.number()) / f32::from(WizardStep::TOTAL) * 100.0;
        pct.round() as u8
    }

    pub fn set_age(&mut self, age: Option<i32>) {
        self.age = age;
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
    }

    pub fn set_prior_exposure(&mut self, prior_exposure: Option<bool>) {
        self.prior_exposure = prior_exposure;
    }

    pub fn toggle_condition(&mut self, tag: ConditionTag) -> &[ConditionTag] {
        self.selection.toggle(tag)
    }

    pub fn selection(&self) -> &ConditionSelection {
        &self.selection
    }

    pub fn can_advance_from_conditions_step(&self) -> bool {
        self.selection.can_advance()
    }

    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && self.blocking_fields().is_empty()
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::NoNextStep)?;
        let blocking = self.blocking_fields();
        if !blocking.is_empty() {
            return Err(WizardError::StepIncomplete {
                step: self.step,
                missing: blocking,
            });
        }
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::NoPreviousStep)?;
        self.step = previous;
        Ok(previous)
    }

    /// Recommendation for the collected answers, available once the results step is reached.
    pub fn recommendation(
        &self,
        engine: &EligibilityEngine,
    ) -> Result<Recommendation, WizardError> {
        if self.step != WizardStep::Results {
            return Err(WizardError::NotAtResults(self.step));
        }
        Ok(engine.evaluate(&self.input())?)
    }

    pub fn input(&self) -> AssessmentInput {
        self.clone().into_input()
    }

    pub fn into_input(self) -> AssessmentInput {
        AssessmentInput {
            age: self.age,
            gender: self.gender,
            prior_exposure: self.prior_exposure,
            conditions: self.selection.into_tags(),
        }
    }

    fn blocking_fields(&self) -> Vec<&'static str> {
        match self.step {
            WizardStep::BasicInformation => {
                let mut missing = Vec::new();
                if !matches!(self.age, Some(age) if age >= 0) {
                    missing.push("age");
                }
                if self.gender.is_none() {
                    missing.push("gender");
                }
                if self.prior_exposure.is_none() {
                    missing.push("prior_exposure");
                }
                missing
            }
            WizardStep::MedicalConditions if !self.can_advance_from_conditions_step() => {
                vec!["conditions"]
            }
            WizardStep::MedicalConditions | WizardStep::Results => Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("{} step is incomplete, missing: {}", .step.label(), .missing.join(", "))]
    StepIncomplete {
        step: WizardStep,
        missing: Vec<&'static str>,
    },
    #[error("already at the final step")]
    NoNextStep,
    #[error("already at the first step")]
    NoPreviousStep,
    #[error("recommendation is only available on the results step (currently {})", .0.label())]
    NotAtResults(WizardStep),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}
