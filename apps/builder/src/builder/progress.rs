use serde::Serialize;

use crate::builder::field_store::FieldStore;
use crate::models::resume::is_filled;

pub const SIGNAL_COUNT: usize = 7;

/// The seven completion signals, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSignals {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub summary: bool,
    pub education: bool,
    pub experience: bool,
    pub skills: bool,
}

impl ProgressSignals {
    pub fn from_store(store: &FieldStore) -> Self {
        let p = &store.personal;
        Self {
            name: is_filled(&p.name),
            email: is_filled(&p.email),
            phone: is_filled(&p.phone),
            summary: is_filled(&p.summary),
            education: store
                .education
                .iter()
                .any(|r| is_filled(&r.entry.school) || is_filled(&r.entry.degree)),
            experience: store
                .experience
                .iter()
                .any(|r| is_filled(&r.entry.company) || is_filled(&r.entry.role)),
            skills: store.skills.any_selected(),
        }
    }

    pub fn as_array(&self) -> [bool; SIGNAL_COUNT] {
        [
            self.name,
            self.email,
            self.phone,
            self.summary,
            self.education,
            self.experience,
            self.skills,
        ]
    }

    pub fn filled(&self) -> usize {
        self.as_array().iter().filter(|s| **s).count()
    }

    /// round(100 × filled / 7), always within 0..=100.
    pub fn score(&self) -> u8 {
        (100.0 * self.filled() as f64 / SIGNAL_COUNT as f64).round() as u8
    }
}

/// Recomputes the completion score from scratch. No caching across calls.
pub fn compute_progress(store: &FieldStore) -> u8 {
    ProgressSignals::from_store(store).score()
}
