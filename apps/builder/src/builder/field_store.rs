use serde::{Deserialize, Serialize};

use crate::builder::skills::SkillSet;
use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalField, PersonalInfo, Row,
};

/// Authoritative form state: identity fields, both row lists and the skill set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStore {
    pub personal: PersonalInfo,
    pub education: Vec<Row<EducationEntry>>,
    pub experience: Vec<Row<ExperienceEntry>>,
    pub skills: SkillSet,
}

impl FieldStore {
    /// The state the host page ships with: one empty row of each kind,
    /// nothing checked, nothing tagged.
    pub fn new(presets: &[String]) -> Self {
        Self {
            personal: PersonalInfo::default(),
            education: vec![Row::blank()],
            experience: vec![Row::blank()],
            skills: SkillSet::new(presets),
        }
    }

    pub fn set_personal(&mut self, field: PersonalField, value: String) {
        *self.personal.field_mut(field) = value;
    }

    /// Restores the initial state while keeping the preset declaration list.
    pub fn reset(&mut self) {
        self.personal = PersonalInfo::default();
        self.education = vec![Row::blank()];
        self.experience = vec![Row::blank()];
        self.skills.clear();
    }
}
