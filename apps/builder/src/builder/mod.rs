// Form state and the synchronization path.
// Every mutation re-renders the affected preview section and recomputes progress
// before returning; nothing is deferred.

pub mod field_store;
pub mod handlers;
pub mod progress;
pub mod rows;
pub mod skills;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::resume::{
    EducationField, ExperienceField, FocusTarget, PersonalField, RowHandle, RowKind,
};
use crate::preview::{preview_html, render, Preview, Section, SectionContent};

use self::field_store::FieldStore;
use self::progress::{compute_progress, ProgressSignals};

#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    #[error("no row with handle {0}")]
    UnknownRow(RowHandle),

    #[error("no preset skill named '{0}'")]
    UnknownPreset(String),
}

/// What one mutation changed, handed back to the page so it can patch itself.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub sections: Vec<SectionContent>,
    pub progress: u8,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusTarget>,
}

/// A user-visible notification, e.g. a failed export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuilderSnapshot {
    pub form: FieldStore,
    pub preview: Preview,
    pub progress: u8,
    pub signals: ProgressSignals,
    pub notice: Option<Notice>,
}

/// Preview HTML and name captured when an export starts.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    pub html: String,
    pub name: String,
}

/// The single builder page instance: form state, its rendered preview and the
/// pending notification.
#[derive(Debug)]
pub struct ResumeBuilder {
    store: FieldStore,
    preview: Preview,
    notice: Option<Notice>,
}

impl ResumeBuilder {
    pub fn new(presets: &[String]) -> Self {
        let store = FieldStore::new(presets);
        let preview = Preview::from_store(&store);
        Self {
            store,
            preview,
            notice: None,
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn progress(&self) -> u8 {
        compute_progress(&self.store)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn snapshot(&self) -> BuilderSnapshot {
        BuilderSnapshot {
            form: self.store.clone(),
            preview: self.preview.clone(),
            progress: self.progress(),
            signals: ProgressSignals::from_store(&self.store),
            notice: self.notice.clone(),
        }
    }

    /// Re-renders one section in full and recomputes progress.
    fn sync(&mut self, section: Section) -> SyncReport {
        let content = render(section, &self.store);
        self.preview.replace(content.clone());
        self.preview.visible = true;
        let progress = self.progress();
        debug!(?section, progress, "preview section re-rendered");
        SyncReport {
            sections: vec![content],
            progress,
            visible: self.preview.visible,
            focus: None,
        }
    }

    /// Report for a mutation that leaves the preview untouched.
    fn unchanged(&self) -> SyncReport {
        SyncReport {
            sections: Vec::new(),
            progress: self.progress(),
            visible: self.preview.visible,
            focus: None,
        }
    }

    // ── identity ─────────────────────────────────────────────────────────────

    pub fn set_personal(&mut self, field: PersonalField, value: String) -> SyncReport {
        self.store.set_personal(field, value);
        self.sync(Section::Identity)
    }

    // ── rows ─────────────────────────────────────────────────────────────────

    pub fn add_education_row(&mut self) -> SyncReport {
        let focus = self.store.add_education_row();
        debug!(row = %focus.row, "education row added");
        SyncReport {
            focus: Some(focus),
            ..self.unchanged()
        }
    }

    pub fn add_experience_row(&mut self) -> SyncReport {
        let focus = self.store.add_experience_row();
        debug!(row = %focus.row, "experience row added");
        SyncReport {
            focus: Some(focus),
            ..self.unchanged()
        }
    }

    pub fn set_education_field(
        &mut self,
        handle: RowHandle,
        field: EducationField,
        value: String,
    ) -> Result<SyncReport, BuilderError> {
        let entry = self
            .store
            .education_mut(handle)
            .ok_or(BuilderError::UnknownRow(handle))?;
        *entry.field_mut(field) = value;
        Ok(self.sync(Section::Education))
    }

    pub fn set_experience_field(
        &mut self,
        handle: RowHandle,
        field: ExperienceField,
        value: String,
    ) -> Result<SyncReport, BuilderError> {
        let entry = self
            .store
            .experience_mut(handle)
            .ok_or(BuilderError::UnknownRow(handle))?;
        *entry.field_mut(field) = value;
        Ok(self.sync(Section::Experience))
    }

    pub fn remove_row(&mut self, handle: RowHandle) -> Result<SyncReport, BuilderError> {
        let kind = self
            .store
            .remove_row(handle)
            .ok_or(BuilderError::UnknownRow(handle))?;
        debug!(row = %handle, ?kind, "row removed");
        Ok(self.sync(match kind {
            RowKind::Education => Section::Education,
            RowKind::Experience => Section::Experience,
        }))
    }

    // ── skills ───────────────────────────────────────────────────────────────

    pub fn set_preset(&mut self, name: &str, checked: bool) -> Result<SyncReport, BuilderError> {
        if !self.store.skills.set_preset(name, checked) {
            return Err(BuilderError::UnknownPreset(name.to_string()));
        }
        Ok(self.sync(Section::Skills))
    }

    /// Adds a custom tag. Rejected input leaves the preview untouched.
    pub fn add_tag(&mut self, text: &str) -> (bool, SyncReport) {
        if self.store.skills.add_tag(text) {
            (true, self.sync(Section::Skills))
        } else {
            (false, self.unchanged())
        }
    }

    pub fn remove_tag(&mut self, text: &str) -> SyncReport {
        self.store.skills.remove_tag(text);
        self.sync(Section::Skills)
    }

    pub fn set_tag_draft(&mut self, text: String) {
        self.store.skills.draft = text;
    }

    /// Commit-key path of the tag input: the draft is always cleared.
    pub fn commit_tag_draft(&mut self) -> (bool, SyncReport) {
        if self.store.skills.commit_draft() {
            (true, self.sync(Section::Skills))
        } else {
            (false, self.unchanged())
        }
    }

    // ── reset ────────────────────────────────────────────────────────────────

    pub fn reset(&mut self) -> SyncReport {
        self.store.reset();
        let exporting = self.preview.exporting;
        self.preview = Preview::from_store(&self.store);
        self.preview.exporting = exporting;
        debug!("builder reset");
        SyncReport {
            sections: Section::ALL
                .into_iter()
                .map(|section| render(section, &self.store))
                .collect(),
            progress: self.progress(),
            visible: false,
            focus: None,
        }
    }

    // ── export bookkeeping ───────────────────────────────────────────────────

    /// Marks the preview as exporting and captures what the renderer needs.
    pub fn begin_export(&mut self) -> ExportTicket {
        self.preview.exporting = true;
        let mut snapshot = self.preview.clone();
        snapshot.exporting = false;
        ExportTicket {
            html: preview_html(&snapshot),
            name: self.store.personal.name.clone(),
        }
    }

    /// Restores the pre-export visual state; a failure becomes a notice.
    pub fn finish_export(&mut self, failure: Option<String>) {
        self.preview.exporting = false;
        if let Some(message) = failure {
            self.notice = Some(Notice {
                message,
                raised_at: Utc::now(),
            });
        }
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::render::{EducationItem, SUMMARY_PLACEHOLDER};

    fn builder() -> ResumeBuilder {
        ResumeBuilder::new(&["Python".to_string(), "Rust".to_string()])
    }

    #[test]
    fn test_new_builder_is_hidden_and_empty() {
        let b = builder();
        assert_eq!(b.progress(), 0);
        assert!(!b.preview().visible);
        assert!(b.preview().education.is_empty());
        assert_eq!(b.preview().identity.summary, SUMMARY_PLACEHOLDER);
    }

    #[test]
    fn test_personal_edit_syncs_identity() {
        let mut b = builder();
        let report = b.set_personal(PersonalField::Name, "Ada".to_string());
        assert_eq!(report.progress, 14);
        assert!(report.visible);
        match &report.sections[..] {
            [SectionContent::Identity(view)] => assert_eq!(view.name, "Ada"),
            other => panic!("expected identity section, got {other:?}"),
        }
        assert_eq!(b.preview().identity.name, "Ada");
    }

    #[test]
    fn test_add_row_reports_focus_without_rerender() {
        let mut b = builder();
        let report = b.add_education_row();
        let focus = report.focus.expect("focus target");
        assert_eq!(focus.kind, RowKind::Education);
        assert!(report.sections.is_empty());
        assert_eq!(b.store().education.len(), 2);
        assert!(!b.preview().visible);
    }

    #[test]
    fn test_new_row_is_wired_into_sync() {
        let mut b = builder();
        let handle = b.add_experience_row().focus.expect("focus").row;
        let report = b
            .set_experience_field(handle, ExperienceField::Role, "Analyst".to_string())
            .expect("known row");
        assert_eq!(b.preview().experience.len(), 1);
        assert_eq!(b.preview().experience[0].title, "Analyst");
        assert_eq!(report.progress, 14);
    }

    #[test]
    fn test_add_n_remove_k_keeps_order_in_store_and_preview() {
        let mut b = builder();
        let first = b.store().education[0].handle;
        b.remove_row(first).expect("initial row");

        let mut handles = Vec::new();
        for i in 0..4 {
            let handle = b.add_education_row().focus.expect("focus").row;
            b.set_education_field(handle, EducationField::School, format!("School {i}"))
                .expect("known row");
            handles.push(handle);
        }

        b.remove_row(handles[2]).expect("known row");

        assert_eq!(b.store().education.len(), 3);
        let primaries: Vec<&str> = b
            .preview()
            .education
            .iter()
            .map(|i| i.primary.as_str())
            .collect();
        assert_eq!(primaries, vec!["School 0", "School 1", "School 3"]);
    }

    #[test]
    fn test_unknown_row_is_error_without_mutation() {
        let mut b = builder();
        let before = b.snapshot();
        let err = b
            .set_education_field(RowHandle::new(), EducationField::Year, "1999".to_string())
            .unwrap_err();
        assert!(matches!(err, BuilderError::UnknownRow(_)));
        assert!(matches!(
            b.remove_row(RowHandle::new()),
            Err(BuilderError::UnknownRow(_))
        ));
        assert_eq!(b.snapshot().form, before.form);
    }

    #[test]
    fn test_unknown_preset() {
        let mut b = builder();
        assert_eq!(
            b.set_preset("COBOL", true).unwrap_err(),
            BuilderError::UnknownPreset("COBOL".to_string())
        );
    }

    #[test]
    fn test_rejected_tag_leaves_preview_untouched() {
        let mut b = builder();
        let (accepted, report) = b.add_tag("Go");
        assert!(accepted);
        assert_eq!(report.sections.len(), 1);

        let (accepted, report) = b.add_tag("Go");
        assert!(!accepted);
        assert!(report.sections.is_empty());
        assert_eq!(b.store().skills.tags, vec!["Go"]);
    }

    #[test]
    fn test_commit_draft_clears_input() {
        let mut b = builder();
        b.set_tag_draft("  ".to_string());
        let (accepted, _) = b.commit_tag_draft();
        assert!(!accepted);
        assert!(b.store().skills.draft.is_empty());

        b.set_tag_draft("Haskell".to_string());
        let (accepted, report) = b.commit_tag_draft();
        assert!(accepted);
        assert_eq!(report.progress, 14);
        assert!(b.store().skills.draft.is_empty());
        assert_eq!(b.preview().skills[0].label, "Haskell");
    }

    #[test]
    fn test_remove_tag_rerenders_skills() {
        let mut b = builder();
        b.add_tag("Go");
        let report = b.remove_tag("Go");
        assert_eq!(report.progress, 0);
        assert!(b.preview().skills.is_empty());
    }

    #[test]
    fn test_lovelace_scenario() {
        let mut b = builder();
        let edu = b.store().education[0].handle;
        b.set_personal(PersonalField::Name, "Ada Lovelace".to_string());
        b.set_education_field(edu, EducationField::School, "Trinity".to_string())
            .expect("known row");
        b.set_education_field(edu, EducationField::Year, "1840".to_string())
            .expect("known row");
        let report = b.set_preset("Python", true).expect("known preset");

        assert_eq!(report.progress, 43);
        assert_eq!(
            b.preview().education,
            vec![EducationItem {
                primary: "Trinity".to_string(),
                secondary: "1840".to_string(),
            }]
        );
        assert!(b.preview().experience.is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut b = builder();
        b.set_personal(PersonalField::Email, "ada@example.com".to_string());
        b.add_education_row();
        b.add_tag("Go");
        b.set_preset("Rust", true).expect("known preset");

        let report = b.reset();

        assert_eq!(report.sections.len(), 4);
        assert_eq!(report.progress, 0);
        assert!(!report.visible);
        assert!(!b.preview().visible);
        assert_eq!(b.store().education.len(), 1);
        assert_eq!(b.store().experience.len(), 1);
        assert!(b.preview().skills.is_empty());
    }

    #[test]
    fn test_export_flag_cleared_on_success_and_failure() {
        let mut b = builder();
        b.set_personal(PersonalField::Name, "Ada".to_string());

        let ticket = b.begin_export();
        assert!(b.preview().exporting);
        assert!(!ticket.html.contains("exporting"));
        assert_eq!(ticket.name, "Ada");
        b.finish_export(None);
        assert!(!b.preview().exporting);
        assert!(b.notice().is_none());

        b.begin_export();
        b.finish_export(Some("renderer unavailable".to_string()));
        assert!(!b.preview().exporting);
        assert_eq!(
            b.notice().map(|n| n.message.as_str()),
            Some("renderer unavailable")
        );
        assert!(b.dismiss_notice().is_some());
        assert!(b.notice().is_none());
    }
}
