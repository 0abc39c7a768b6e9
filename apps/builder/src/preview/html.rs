//! HTML serialization of the preview tree. All user text is escaped.

use crate::preview::render::{BadgeSource, Preview};

/// Serializes the whole preview root, including its visual-state classes.
pub fn preview_html(preview: &Preview) -> String {
    let mut classes = vec!["resume-preview"];
    if preview.visible {
        classes.push("show");
    }
    if preview.exporting {
        classes.push("exporting");
    }

    let mut html = String::new();
    html.push_str(&format!(
        "<div id=\"resumePreview\" class=\"{}\">",
        classes.join(" ")
    ));
    html.push_str(&identity_html(preview));
    html.push_str(&education_html(preview));
    html.push_str(&experience_html(preview));
    html.push_str(&skills_html(preview));
    html.push_str("</div>");
    html
}

fn identity_html(preview: &Preview) -> String {
    let id = &preview.identity;
    format!(
        "<header><h1 id=\"previewName\">{}</h1><p id=\"previewContact\">{} | {}</p>\
         <p id=\"previewSummary\">{}</p></header>",
        escape_html(&id.name),
        escape_html(&id.email),
        escape_html(&id.phone),
        escape_html(&id.summary)
    )
}

fn education_html(preview: &Preview) -> String {
    let mut html = String::from("<section><h2>Education</h2><ul id=\"educationList\">");
    for item in &preview.education {
        html.push_str(&format!(
            "<li><strong>{}</strong>",
            escape_html(&item.primary)
        ));
        if !item.secondary.is_empty() {
            html.push_str(&format!(
                "<span class=\"meta\">{}</span>",
                escape_html(&item.secondary)
            ));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></section>");
    html
}

fn experience_html(preview: &Preview) -> String {
    let mut html = String::from("<section><h2>Experience</h2><ul id=\"experienceList\">");
    for item in &preview.experience {
        html.push_str(&format!(
            "<li><strong>{}</strong><span class=\"meta\">{}</span>",
            escape_html(&item.title),
            escape_html(&item.period)
        ));
        if let Some(description) = &item.description {
            html.push_str(&format!("<p>{}</p>", escape_html(description)));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></section>");
    html
}

fn skills_html(preview: &Preview) -> String {
    let mut html = String::from("<section><h2>Skills</h2><ul id=\"skillsList\">");
    for badge in &preview.skills {
        let class = match badge.source {
            BadgeSource::Preset => "badge preset",
            BadgeSource::Custom => "badge custom",
        };
        html.push_str(&format!(
            "<li class=\"{class}\">{}</li>",
            escape_html(&badge.label)
        ));
    }
    html.push_str("</ul></section>");
    html
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
