use serde::{Deserialize, Serialize};

use super::domain::{ConditionKind, ConditionTag};

/// Selected condition tags for the medical conditions step.
///
/// "None of the above" never coexists with a substantive condition. The
/// healthcare worker flag is exempt and may accompany either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ConditionTag>", into = "Vec<ConditionTag>")]
pub struct ConditionSelection {
    selected: Vec<ConditionTag>,
}

impl ConditionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from previously stored tags by replaying them as toggles, so that
    /// contradictory or duplicated input still lands in a valid state.
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = ConditionTag>,
    {
        let mut selection = Self::new();
        for tag in tags {
            if !selection.contains(tag) {
                selection.toggle(tag);
            }
        }
        selection
    }

    pub fn toggle(&mut self, tag: ConditionTag) -> &[ConditionTag] {
        match tag.kind() {
            ConditionKind::NoneOfTheAbove => {
                if self.contains(tag) {
                    self.remove(tag);
                } else {
                    self.selected
                        .retain(|selected| *selected == ConditionTag::MedicalStaff);
                    self.selected.push(tag);
                }
            }
            ConditionKind::MedicalStaff => self.flip(tag),
            ConditionKind::Substantive => {
                self.remove(ConditionTag::None);
                self.flip(tag);
            }
        }

        &self.selected
    }

    pub fn contains(&self, tag: ConditionTag) -> bool {
        self.selected.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Tags in the order they were selected.
    pub fn tags(&self) -> &[ConditionTag] {
        &self.selected
    }

    pub fn into_tags(self) -> Vec<ConditionTag> {
        self.selected
    }

    /// The respondent may leave the conditions step once anything, including "none", is ticked.
    pub fn can_advance(&self) -> bool {
        !self.is_empty()
    }

    fn flip(&mut self, tag: ConditionTag) {
        if self.contains(tag) {
            self.remove(tag);
        } else {
            self.selected.push(tag);
        }
    }

    fn remove(&mut self, tag: ConditionTag) {
        self.selected.retain(|selected| *selected != tag);
    }
}

impl From<Vec<ConditionTag>> for ConditionSelection {
    fn from(tags: Vec<ConditionTag>) -> Self {
        Self::from_tags(tags)
    }
}

impl From<ConditionSelection> for Vec<ConditionTag> {
    fn from(selection: ConditionSelection) -> Self {
        selection.selected
    }
}

/// Returns true when a tag list breaks the "none of the above" exclusion.
pub(crate) fn violates_exclusion(tags: &[ConditionTag]) -> bool {
    tags.contains(&ConditionTag::None) && tags.iter().any(|tag| tag.is_substantive())
}
