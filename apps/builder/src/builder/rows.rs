//! Row management: append-only creation and removal of repeatable rows.

use crate::builder::field_store::FieldStore;
use crate::models::resume::{
    EducationEntry, ExperienceEntry, FocusTarget, Row, RowHandle, RowKind,
};

impl FieldStore {
    /// Appends an empty education row and returns the field that takes focus.
    pub fn add_education_row(&mut self) -> FocusTarget {
        let row: Row<EducationEntry> = Row::blank();
        let handle = row.handle;
        self.education.push(row);
        FocusTarget {
            row: handle,
            kind: RowKind::Education,
            field: "school",
        }
    }

    pub fn add_experience_row(&mut self) -> FocusTarget {
        let row: Row<ExperienceEntry> = Row::blank();
        let handle = row.handle;
        self.experience.push(row);
        FocusTarget {
            row: handle,
            kind: RowKind::Experience,
            field: "role",
        }
    }

    /// Detaches a row from whichever list holds it.
    /// Returns the list it belonged to, or `None` for an unknown handle.
    pub fn remove_row(&mut self, handle: RowHandle) -> Option<RowKind> {
        if let Some(pos) = self.education.iter().position(|r| r.handle == handle) {
            self.education.remove(pos);
            return Some(RowKind::Education);
        }
        if let Some(pos) = self.experience.iter().position(|r| r.handle == handle) {
            self.experience.remove(pos);
            return Some(RowKind::Experience);
        }
        None
    }

    pub fn education_mut(&mut self, handle: RowHandle) -> Option<&mut EducationEntry> {
        self.education
            .iter_mut()
            .find(|r| r.handle == handle)
            .map(|r| &mut r.entry)
    }

    pub fn experience_mut(&mut self, handle: RowHandle) -> Option<&mut ExperienceEntry> {
        self.experience
            .iter_mut()
            .find(|r| r.handle == handle)
            .map(|r| &mut r.entry)
    }
}
