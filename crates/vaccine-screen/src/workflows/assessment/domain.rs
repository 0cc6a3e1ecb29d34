use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Self-reported gender collected on the basic information step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unspecified => "Unspecified",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "unspecified" | "other" | "none" => Some(Gender::Unspecified),
            _ => None,
        }
    }
}

/// How a tag participates in the mutual-exclusion rules of the selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// A medical condition that conflicts with "none of the above".
    Substantive,
    /// Occupational flag exempt from mutual exclusion.
    MedicalStaff,
    NoneOfTheAbove,
}

/// Catalog of conditions a respondent can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    Pregnant,
    ChronicDisease,
    LiverDisease,
    KidneyDisease,
    SpleenDisorder,
    HivLowCd4,
    HivHighCd4,
    Immunodeficiency,
    Transplant,
    MedicalStaff,
    None,
}

impl ConditionTag {
    /// Every tag in display order: substantive conditions first, then the two special entries.
    pub const CATALOG: [ConditionTag; 11] = [
        ConditionTag::Pregnant,
        ConditionTag::ChronicDisease,
        ConditionTag::LiverDisease,
        ConditionTag::KidneyDisease,
        ConditionTag::SpleenDisorder,
        ConditionTag::HivLowCd4,
        ConditionTag::HivHighCd4,
        ConditionTag::Immunodeficiency,
        ConditionTag::Transplant,
        ConditionTag::None,
        ConditionTag::MedicalStaff,
    ];

    pub const fn kind(self) -> ConditionKind {
        match self {
            ConditionTag::MedicalStaff => ConditionKind::MedicalStaff,
            ConditionTag::None => ConditionKind::NoneOfTheAbove,
            _ => ConditionKind::Substantive,
        }
    }

    pub const fn is_substantive(self) -> bool {
        matches!(self.kind(), ConditionKind::Substantive)
    }

    /// Stable identifier used on the wire and in persisted records.
    pub const fn id(self) -> &'static str {
        match self {
            ConditionTag::Pregnant => "pregnant",
            ConditionTag::ChronicDisease => "chronic_disease",
            ConditionTag::LiverDisease => "liver_disease",
            ConditionTag::KidneyDisease => "kidney_disease",
            ConditionTag::SpleenDisorder => "spleen_disorder",
            ConditionTag::HivLowCd4 => "hiv_low_cd4",
            ConditionTag::HivHighCd4 => "hiv_high_cd4",
            ConditionTag::Immunodeficiency => "immunodeficiency",
            ConditionTag::Transplant => "transplant",
            ConditionTag::MedicalStaff => "medical_staff",
            ConditionTag::None => "none",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConditionTag::Pregnant => "Pregnant",
            ConditionTag::ChronicDisease => "Heart disease, diabetes or chronic obstructive pulmonary disease",
            ConditionTag::LiverDisease => "Chronic liver disease",
            ConditionTag::KidneyDisease => "Chronic kidney disease",
            ConditionTag::SpleenDisorder => "Asplenia or impaired spleen function",
            ConditionTag::HivLowCd4 => "HIV infection (CD4+ count at or below 200/uL)",
            ConditionTag::HivHighCd4 => "HIV infection (CD4+ count at or above 200/uL)",
            ConditionTag::Immunodeficiency => "Severe immunodeficiency",
            ConditionTag::Transplant => "Organ or bone marrow transplant recipient",
            ConditionTag::MedicalStaff => "Healthcare worker",
            ConditionTag::None => "None of the above",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::CATALOG
            .into_iter()
            .find(|tag| tag.id() == normalized)
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Catalog entry exposed to clients rendering the condition checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionDescriptor {
    pub id: ConditionTag,
    pub label: &'static str,
    pub kind: ConditionKind,
}

pub fn condition_catalog() -> Vec<ConditionDescriptor> {
    ConditionTag::CATALOG
        .into_iter()
        .map(|tag| ConditionDescriptor {
            id: tag,
            label: tag.label(),
            kind: tag.kind(),
        })
        .collect()
}

/// Answers collected across the questionnaire, consumed once by the eligibility engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub prior_exposure: Option<bool>,
    #[serde(default)]
    pub conditions: Vec<ConditionTag>,
}

impl AssessmentInput {
    pub fn has_condition(&self, tag: ConditionTag) -> bool {
        self.conditions.contains(&tag)
    }

    pub fn has_any_condition(&self, tags: &[ConditionTag]) -> bool {
        tags.iter().any(|tag| self.has_condition(*tag))
    }

    /// Drops repeated condition tags, keeping the first occurrence of each.
    pub fn dedup_conditions(&mut self) {
        let mut seen = Vec::with_capacity(self.conditions.len());
        self.conditions.retain(|tag| {
            let fresh = !seen.contains(tag);
            if fresh {
                seen.push(*tag);
            }
            fresh
        });
    }

    /// Names of the scalar answers that are still missing.
    pub fn missing_answers(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
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
}

/// Payload handed to the service for evaluation and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_name: Option<String>,
    #[serde(flatten)]
    pub input: AssessmentInput,
}

impl From<AssessmentInput> for AssessmentSubmission {
    fn from(input: AssessmentInput) -> Self {
        Self {
            respondent_name: None,
            input,
        }
    }
}
