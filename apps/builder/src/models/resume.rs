use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returns true when a free-text value carries something other than whitespace.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Opaque address of one repeatable row. Ordering is the row's list position;
/// the handle only lets callers refer to a row while positions shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowHandle(Uuid);

impl RowHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Education,
    Experience,
}

/// One repeatable group of fields, addressed by its handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<T> {
    pub handle: RowHandle,
    #[serde(flatten)]
    pub entry: T,
}

impl<T: Default> Row<T> {
    /// Clones the empty field template into a fresh row.
    pub fn blank() -> Self {
        Self {
            handle: RowHandle::new(),
            entry: T::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Identity
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Summary,
}

impl PersonalInfo {
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Summary => &mut self.summary,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education / experience rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    School,
    Degree,
    Year,
}

impl EducationEntry {
    pub fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::School => &mut self.school,
            EducationField::Degree => &mut self.degree,
            EducationField::Year => &mut self.year,
        }
    }

    /// True when every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        !(is_filled(&self.school) || is_filled(&self.degree) || is_filled(&self.year))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Company,
    Role,
    Period,
    Description,
}

impl ExperienceEntry {
    pub fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Role => &mut self.role,
            ExperienceField::Period => &mut self.period,
            ExperienceField::Description => &mut self.description,
        }
    }

    pub fn is_blank(&self) -> bool {
        !(is_filled(&self.company)
            || is_filled(&self.role)
            || is_filled(&self.period)
            || is_filled(&self.description))
    }
}

/// The field that receives focus when a row is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocusTarget {
    pub row: RowHandle,
    pub kind: RowKind,
    pub field: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// A fixed, enumerated skill offered as a checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSkill {
    pub name: String,
    pub checked: bool,
}
