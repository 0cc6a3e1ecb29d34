use serde::{Deserialize, Serialize};

/// Which ordered decision list the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTable {
    /// Exclusions and the age floor only; everyone else is recommended.
    Minimal,
    /// Adds the age ceiling and prior-exposure rules.
    Extended,
}

impl RuleTable {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(RuleTable::Minimal),
            "extended" => Some(RuleTable::Extended),
            _ => None,
        }
    }
}

/// Thresholds and rule selection for the eligibility engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub rule_table: RuleTable,
    /// Youngest approved age in years.
    pub minimum_age: u8,
    /// Oldest age with adequate efficacy and safety data.
    pub maximum_age: u8,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            rule_table: RuleTable::Extended,
            minimum_age: 4,
            maximum_age: 45,
        }
    }
}
