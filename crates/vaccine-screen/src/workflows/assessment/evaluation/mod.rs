mod config;
mod policy;
mod rules;

pub use config::{EligibilityConfig, RuleTable};
pub use policy::{DecisionRule, Recommendation, Severity, Verdict};

use super::domain::AssessmentInput;
use super::selection::violates_exclusion;

/// Stateless evaluator mapping questionnaire answers to a recommendation.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Evaluate an assessment. Only malformed input fails; every well-formed input yields
    /// exactly one recommendation.
    pub fn evaluate(&self, input: &AssessmentInput) -> Result<Recommendation, EligibilityError> {
        validate(input)?;

        let rule = rules::select_rule(input, &self.config);
        let default_verdict = match self.config.rule_table {
            RuleTable::Minimal => Verdict::Recommended,
            RuleTable::Extended => Verdict::ConsultDoctor,
        };
        let verdict = rule.verdict(default_verdict);

        Ok(Recommendation {
            verdict,
            reason: rule.reason(self.config.minimum_age, self.config.maximum_age),
            severity: verdict.severity(),
            rule,
        })
    }
}

fn validate(input: &AssessmentInput) -> Result<(), EligibilityError> {
    if let Some(age) = input.age {
        if age < 0 {
            return Err(EligibilityError::InvalidInput {
                field: "age",
                detail: format!("age must be a non-negative integer, found {age}"),
            });
        }
    }

    if violates_exclusion(&input.conditions) {
        return Err(EligibilityError::InvalidInput {
            field: "conditions",
            detail: "\"none\" cannot be combined with a medical condition".to_string(),
        });
    }

    Ok(())
}

/// Malformed input rejected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid {field}: {detail}")]
    InvalidInput { field: &'static str, detail: String },
}
