use serde::{Deserialize, Serialize};

/// High-level outcome shown to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommended,
    NotRecommended,
    ConsultDoctor,
}

impl Verdict {
    /// Headline persisted alongside the reason.
    pub const fn headline(self) -> &'static str {
        match self {
            Verdict::Recommended => "Dengue vaccination recommended",
            Verdict::NotRecommended => "Dengue vaccination not recommended",
            Verdict::ConsultDoctor => "Consult a doctor before dengue vaccination",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Verdict::Recommended => Severity::Positive,
            Verdict::NotRecommended => Severity::Negative,
            Verdict::ConsultDoctor => Severity::Neutral,
        }
    }
}

/// Presentation tone of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Negative,
    Neutral,
}

/// Entry of the ordered decision list that produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    Pregnancy,
    ImmuneCompromise,
    BelowMinimumAge,
    AboveMaximumAge,
    PriorExposure,
    NoPriorExposure,
    Default,
}

impl DecisionRule {
    pub(crate) const fn verdict(self, default_verdict: Verdict) -> Verdict {
        match self {
            DecisionRule::Pregnancy
            | DecisionRule::ImmuneCompromise
            | DecisionRule::BelowMinimumAge => Verdict::NotRecommended,
            DecisionRule::AboveMaximumAge | DecisionRule::NoPriorExposure => {
                Verdict::ConsultDoctor
            }
            DecisionRule::PriorExposure => Verdict::Recommended,
            DecisionRule::Default => default_verdict,
        }
    }

    pub(crate) fn reason(self, minimum_age: u8, maximum_age: u8) -> String {
        match self {
            DecisionRule::Pregnancy => {
                "Dengue vaccination is not advised during pregnancy because safety data remain limited."
                    .to_string()
            }
            DecisionRule::ImmuneCompromise => {
                "Severe immunodeficiency, a low CD4+ count or a prior transplant carries a higher infection risk and may prevent an adequate vaccine response."
                    .to_string()
            }
            DecisionRule::BelowMinimumAge => format!(
                "The dengue vaccine is not approved for children under {minimum_age} years of age."
            ),
            DecisionRule::AboveMaximumAge => format!(
                "Efficacy and safety data above {maximum_age} years of age are limited; discuss vaccination with a doctor."
            ),
            DecisionRule::PriorExposure => {
                "The vaccine is highly effective at preventing severe reinfection in people with a previous dengue infection."
                    .to_string()
            }
            DecisionRule::NoPriorExposure => {
                "Without a previous dengue infection the benefits and risks of vaccination should be weighed with a doctor."
                    .to_string()
            }
            DecisionRule::Default => {
                "The vaccine reduces the severity of both first and repeat dengue infections."
                    .to_string()
            }
        }
    }
}

/// Outcome of an eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub reason: String,
    pub severity: Severity,
    pub rule: DecisionRule,
}

impl Recommendation {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.verdict.headline(), self.reason)
    }
}
