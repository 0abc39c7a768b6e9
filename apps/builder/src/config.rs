use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::export::ExportSettings;

pub const DEFAULT_PRESET_SKILLS: &[&str] = &["JavaScript", "Python", "Rust", "SQL", "HTML/CSS", "Git"];

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub pdf_render_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Host page template; the built-in one is used when unset.
    pub page_template: Option<PathBuf>,
    pub preset_skills: Vec<String>,
    pub export: ExportSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ExportSettings::default();

        Ok(Config {
            pdf_render_url: require_env("PDF_RENDER_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            page_template: std::env::var("PAGE_TEMPLATE").ok().map(PathBuf::from),
            preset_skills: std::env::var("PRESET_SKILLS")
                .map(|raw| parse_preset_list(&raw))
                .unwrap_or_else(|_| default_presets()),
            export: ExportSettings {
                margin_mm: parse_env("EXPORT_MARGIN_MM", defaults.margin_mm)?,
                image_quality: parse_env("EXPORT_IMAGE_QUALITY", defaults.image_quality)?,
                scale: parse_env("EXPORT_SCALE", defaults.scale)?,
                page_format: std::env::var("EXPORT_PAGE_FORMAT").unwrap_or(defaults.page_format),
                orientation: std::env::var("EXPORT_ORIENTATION").unwrap_or(defaults.orientation),
            },
        })
    }
}

pub fn default_presets() -> Vec<String> {
    DEFAULT_PRESET_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Splits a comma-separated preset list, trimming and dropping empty or
/// repeated names while keeping declaration order.
pub fn parse_preset_list(raw: &str) -> Vec<String> {
    let mut presets: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !presets.iter().any(|p| p == name) {
            presets.push(name.to_string());
        }
    }
    presets
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
