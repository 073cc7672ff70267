//! Preview and section-list projections.
//!
//! Fields ending in `_html` are markup fragments ready for insertion:
//! plain-text fields of the document are escaped, section content is passed
//! through as authored.

use crate::model::document::{Document, Section, DEFAULT_IDENTITY, UNTITLED_SECTION_TITLE};
use once_cell::sync::Lazy;
use regex::Regex;

const EMPTY_PREVIEW_BODY: &str = "<p></p>";
const EMPTY_LIST_BODY: &str = "<em>No content yet</em>";
const SUMMARY_MAX_CHARS: usize = 100;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Formatted résumé preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeView {
    pub name_html: String,
    pub contact_html: String,
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSection {
    pub title_html: String,
    pub body_html: String,
}

/// One row of the editable section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionListItem {
    pub index: usize,
    /// One-based position label, e.g. `#2`.
    pub label: String,
    pub title_html: String,
    pub body_html: String,
    /// Tag-stripped plain text, capped at 100 chars. `None` when empty.
    pub summary: Option<String>,
}

/// Projects the preview.
pub fn render(document: &Document) -> ResumeView {
    let name = if document.identity.is_empty() {
        DEFAULT_IDENTITY
    } else {
        document.identity.as_str()
    };

    ResumeView {
        name_html: escape_html(name),
        contact_html: escape_html(&document.contact),
        sections: document.sections.iter().map(preview_section).collect(),
    }
}

/// Projects the editable list in document order.
pub fn render_section_list(document: &Document) -> Vec<SectionListItem> {
    document
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| SectionListItem {
            index,
            label: format!("#{}", index + 1),
            title_html: escape_html(&section.title),
            body_html: body_or(&section.content, EMPTY_LIST_BODY),
            summary: plain_text_summary(&section.content),
        })
        .collect()
}

impl ResumeView {
    /// Preview markup consumed by the print/preview surface.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"resume\">");
        html.push_str("<div class=\"header\"><div><h2>");
        html.push_str(&self.name_html);
        html.push_str("</h2><div class=\"meta\">");
        html.push_str(&self.contact_html);
        html.push_str("</div></div></div>");
        for section in &self.sections {
            html.push_str("<div class=\"section\"><h3>");
            html.push_str(&section.title_html);
            html.push_str("</h3><div>");
            html.push_str(&section.body_html);
            html.push_str("</div></div>");
        }
        html.push_str("</div>");
        html
    }
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn preview_section(section: &Section) -> PreviewSection {
    let title = if section.title.is_empty() {
        UNTITLED_SECTION_TITLE
    } else {
        section.title.as_str()
    };
    PreviewSection {
        title_html: escape_html(title),
        body_html: body_or(&section.content, EMPTY_PREVIEW_BODY),
    }
}

fn body_or(content: &str, fallback: &str) -> String {
    if content.is_empty() {
        fallback.to_string()
    } else {
        content.to_string()
    }
}

fn plain_text_summary(content: &str) -> Option<String> {
    let without_tags = TAG_RE.replace_all(content, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_tags, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(SUMMARY_MAX_CHARS).collect())
    }
}
