//! Host page template and the markup contract it must satisfy.
//!
//! The template is checked once at startup. A template missing any required
//! element id or substitution slot is rejected, and the error names all of them.

use std::path::Path;

use thiserror::Error;

use crate::builder::ResumeBuilder;
use crate::preview::html::escape_html;
use crate::preview::preview_html;

const BUILT_IN_TEMPLATE: &str = include_str!("../assets/index.html");

/// Element ids the page must provide.
pub const REQUIRED_ELEMENTS: &[&str] = &[
    "resumeForm",
    "name",
    "email",
    "phone",
    "summary",
    "educationContainer",
    "addEducation",
    "experienceContainer",
    "addExperience",
    "presetSkills",
    "skillTagInput",
    "progressBar",
    "exportPdf",
    "reset",
];

const PREVIEW_SLOT: &str = "{{preview}}";
const PROGRESS_SLOT: &str = "{{progress}}";
const PRESETS_SLOT: &str = "{{presets}}";
const REQUIRED_SLOTS: &[&str] = &[PREVIEW_SLOT, PROGRESS_SLOT, PRESETS_SLOT];

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("page template is missing required elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),

    #[error("failed to read page template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
}

impl PageTemplate {
    /// Verifies a template against the markup contract.
    pub fn parse(source: String) -> Result<Self, MarkupError> {
        let missing: Vec<String> = REQUIRED_ELEMENTS
            .iter()
            .filter(|id| !source.contains(&format!("id=\"{id}\"")))
            .map(|id| format!("#{id}"))
            .chain(
                REQUIRED_SLOTS
                    .iter()
                    .filter(|slot| !source.contains(**slot))
                    .map(|slot| slot.to_string()),
            )
            .collect();

        if !missing.is_empty() {
            return Err(MarkupError::MissingElements(missing));
        }
        Ok(Self { source })
    }

    pub fn built_in() -> Result<Self, MarkupError> {
        Self::parse(BUILT_IN_TEMPLATE.to_string())
    }

    /// Loads the template at `path`, or the built-in one when no path is set.
    pub fn load(path: Option<&Path>) -> Result<Self, MarkupError> {
        match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|source| MarkupError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::parse(source)
            }
            None => Self::built_in(),
        }
    }

    /// Fills the template with the builder's current preview, progress and presets.
    pub fn render(&self, builder: &ResumeBuilder) -> String {
        let presets: String = builder
            .store()
            .skills
            .presets
            .iter()
            .map(|preset| {
                let name = escape_html(&preset.name);
                let checked = if preset.checked { " checked" } else { "" };
                format!(
                    "<label><input type=\"checkbox\" class=\"skill\" value=\"{name}\"{checked}> {name}</label>"
                )
            })
            .collect();

        self.source
            .replace(PRESETS_SLOT, &presets)
            .replace(PROGRESS_SLOT, &builder.progress().to_string())
            .replace(PREVIEW_SLOT, &preview_html(builder.preview()))
    }
}
