use super::super::domain::{AssessmentInput, ConditionTag};
use super::config::{EligibilityConfig, RuleTable};
use super::policy::DecisionRule;

const IMMUNE_COMPROMISE: [ConditionTag; 3] = [
    ConditionTag::Immunodeficiency,
    ConditionTag::HivLowCd4,
    ConditionTag::Transplant,
];

/// Walks the ordered decision list and returns the first rule that applies.
pub(crate) fn select_rule(input: &AssessmentInput, config: &EligibilityConfig) -> DecisionRule {
    if input.has_condition(ConditionTag::Pregnant) {
        return DecisionRule::Pregnancy;
    }

    if input.has_any_condition(&IMMUNE_COMPROMISE) {
        return DecisionRule::ImmuneCompromise;
    }

    if let Some(age) = input.age {
        if age < i32::from(config.minimum_age) {
            return DecisionRule::BelowMinimumAge;
        }
    }

    if config.rule_table == RuleTable::Minimal {
        return DecisionRule::Default;
    }

    if let Some(age) = input.age {
        if age > i32::from(config.maximum_age) {
            return DecisionRule::AboveMaximumAge;
        }
    }

    match input.prior_exposure {
        Some(true) => DecisionRule::PriorExposure,
        Some(false) => DecisionRule::NoPriorExposure,
        None => DecisionRule::Default,
    }
}
