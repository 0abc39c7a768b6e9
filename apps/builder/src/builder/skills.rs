//! Skill tags: free-text tags plus the disjoint preset checkboxes.
//!
//! Custom tags are deduplicated by exact, case-sensitive match and keep their
//! insertion order. Presets are never added to or removed from the tag list.

use serde::{Deserialize, Serialize};

use crate::models::resume::PresetSkill;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub presets: Vec<PresetSkill>,
    pub tags: Vec<String>,
    /// Current content of the tag-input field.
    pub draft: String,
}

impl SkillSet {
    pub fn new(presets: &[String]) -> Self {
        Self {
            presets: presets
                .iter()
                .map(|name| PresetSkill {
                    name: name.clone(),
                    checked: false,
                })
                .collect(),
            tags: Vec::new(),
            draft: String::new(),
        }
    }

    /// Adds a trimmed tag. Returns false for empty input and exact duplicates.
    pub fn add_tag(&mut self, text: &str) -> bool {
        let tag = text.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag by value. Returns whether it was present.
    pub fn remove_tag(&mut self, text: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != text);
        self.tags.len() != before
    }

    /// Commits the tag-input draft. The draft is cleared whether or not the
    /// tag was accepted.
    pub fn commit_draft(&mut self) -> bool {
        let draft = std::mem::take(&mut self.draft);
        self.add_tag(&draft)
    }

    /// Sets a preset's checked flag. Returns false when no preset has that name.
    pub fn set_preset(&mut self, name: &str, checked: bool) -> bool {
        match self.presets.iter_mut().find(|p| p.name == name) {
            Some(preset) => {
                preset.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn checked_presets(&self) -> impl Iterator<Item = &str> {
        self.presets
            .iter()
            .filter(|p| p.checked)
            .map(|p| p.name.as_str())
    }

    /// True when at least one preset is checked or one tag exists.
    pub fn any_selected(&self) -> bool {
        !self.tags.is_empty() || self.presets.iter().any(|p| p.checked)
    }

    pub fn clear(&mut self) {
        for preset in &mut self.presets {
            preset.checked = false;
        }
        self.tags.clear();
        self.draft.clear();
    }
}
