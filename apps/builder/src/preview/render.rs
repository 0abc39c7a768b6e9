//! Preview projection: a pure function from form state to preview nodes.
//!
//! Each section is rebuilt from scratch on every call; running it twice on
//! unchanged state yields an identical result.

use serde::{Deserialize, Serialize};

use crate::builder::field_store::FieldStore;
use crate::models::resume::{EducationEntry, ExperienceEntry, PersonalInfo};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const EMAIL_PLACEHOLDER: &str = "Email";
pub const PHONE_PLACEHOLDER: &str = "Phone";
pub const SUMMARY_PLACEHOLDER: &str = "Profile summary will appear here...";
pub const EDUCATION_PLACEHOLDER: &str = "Untitled education";
pub const ROLE_PLACEHOLDER: &str = "Untitled role";

const DEGREE_YEAR_SEPARATOR: &str = " · ";
const COMPANY_SEPARATOR: &str = " — ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Identity,
    Education,
    Experience,
    Skills,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Identity,
        Section::Education,
        Section::Experience,
        Section::Skills,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub period: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeSource {
    Preset,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBadge {
    pub label: String,
    pub source: BadgeSource,
}

/// Replacement content for exactly one preview section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "content", rename_all = "snake_case")]
pub enum SectionContent {
    Identity(IdentityView),
    Education(Vec<EducationItem>),
    Experience(Vec<ExperienceItem>),
    Skills(Vec<SkillBadge>),
}

/// The rendered preview tree plus the visual state of its root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub identity: IdentityView,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub skills: Vec<SkillBadge>,
    /// Set by the first synchronizing edit, cleared by reset.
    pub visible: bool,
    /// Transient flag held for the duration of an export.
    pub exporting: bool,
}

impl Preview {
    /// Renders every section from the given state. The root starts hidden.
    pub fn from_store(store: &FieldStore) -> Self {
        Self {
            identity: render_identity(&store.personal),
            education: render_education(store),
            experience: render_experience(store),
            skills: render_skills(store),
            visible: false,
            exporting: false,
        }
    }

    /// Clears a section and rebuilds it from the given content.
    pub fn replace(&mut self, content: SectionContent) {
        match content {
            SectionContent::Identity(view) => self.identity = view,
            SectionContent::Education(items) => self.education = items,
            SectionContent::Experience(items) => self.experience = items,
            SectionContent::Skills(badges) => self.skills = badges,
        }
    }
}

pub fn render(section: Section, store: &FieldStore) -> SectionContent {
    match section {
        Section::Identity => SectionContent::Identity(render_identity(&store.personal)),
        Section::Education => SectionContent::Education(render_education(store)),
        Section::Experience => SectionContent::Experience(render_experience(store)),
        Section::Skills => SectionContent::Skills(render_skills(store)),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

pub fn render_identity(personal: &PersonalInfo) -> IdentityView {
    IdentityView {
        name: or_placeholder(&personal.name, NAME_PLACEHOLDER),
        email: or_placeholder(&personal.email, EMAIL_PLACEHOLDER),
        phone: or_placeholder(&personal.phone, PHONE_PLACEHOLDER),
        summary: or_placeholder(&personal.summary, SUMMARY_PLACEHOLDER),
    }
}

fn education_item(entry: &EducationEntry) -> EducationItem {
    let school = entry.school.trim();
    let degree = entry.degree.trim();
    let year = entry.year.trim();

    let primary = [school, degree]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(EDUCATION_PLACEHOLDER)
        .to_string();

    let secondary = match (degree.is_empty(), year.is_empty()) {
        (false, false) => format!("{degree}{DEGREE_YEAR_SEPARATOR}{year}"),
        (false, true) => degree.to_string(),
        (true, false) => year.to_string(),
        (true, true) => String::new(),
    };

    EducationItem { primary, secondary }
}

pub fn render_education(store: &FieldStore) -> Vec<EducationItem> {
    store
        .education
        .iter()
        .filter(|row| !row.entry.is_blank())
        .map(|row| education_item(&row.entry))
        .collect()
}

fn experience_item(entry: &ExperienceEntry) -> ExperienceItem {
    let role = entry.role.trim();
    let company = entry.company.trim();
    let description = entry.description.trim();

    let mut title = if role.is_empty() {
        ROLE_PLACEHOLDER.to_string()
    } else {
        role.to_string()
    };
    if !company.is_empty() {
        title.push_str(COMPANY_SEPARATOR);
        title.push_str(company);
    }

    ExperienceItem {
        title,
        period: entry.period.trim().to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    }
}

pub fn render_experience(store: &FieldStore) -> Vec<ExperienceItem> {
    store
        .experience
        .iter()
        .filter(|row| !row.entry.is_blank())
        .map(|row| experience_item(&row.entry))
        .collect()
}

/// Checked presets in declaration order, then custom tags in insertion order.
/// A custom tag that exactly matches a checked preset is shown once, at the
/// preset's position.
pub fn render_skills(store: &FieldStore) -> Vec<SkillBadge> {
    let checked: Vec<&str> = store.skills.checked_presets().collect();

    let presets = checked.iter().map(|name| SkillBadge {
        label: name.to_string(),
        source: BadgeSource::Preset,
    });
    let custom = store
        .skills
        .tags
        .iter()
        .filter(|tag| !checked.contains(&tag.as_str()))
        .map(|tag| SkillBadge {
            label: tag.clone(),
            source: BadgeSource::Custom,
        });

    presets.chain(custom).collect()
}
