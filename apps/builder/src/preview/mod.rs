// Preview rendering: a pure projection of the form state (render) and its
// HTML serialization (html), shared by the host page and PDF export.

pub mod html;
pub mod render;

pub use html::preview_html;
pub use render::{render, Preview, Section, SectionContent};
