//! Résumé document model.
//!
//! # Responsibility
//! - Define the canonical document shape shared by store, storage and views.
//! - Provide the built-in starter, sample and blank documents.
//!
//! # Invariants
//! - `sections` order is the rendering and export order.
//! - Section `content` is always a string; emptiness is resolved at render
//!   time, never persisted as a placeholder.
//! - Wire names match previously exported files: `name`, `contact`,
//!   `sections[].title`, `sections[].content`.

use serde::{Deserialize, Deserializer, Serialize};

/// Title stored when an edit commits a blank title.
pub const UNTITLED_SECTION_TITLE: &str = "Untitled";
/// Identity used by blank documents and as render fallback.
pub const DEFAULT_IDENTITY: &str = "Your Name";
/// Title of a freshly appended section.
pub const PLACEHOLDER_SECTION_TITLE: &str = "New Section";
/// Content of a freshly appended section.
pub const PLACEHOLDER_SECTION_CONTENT: &str = "<p>Describe this section...</p>";

/// One titled content block of the résumé.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Section heading. Blank titles are normalized to `Untitled` on edit.
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    /// Restricted markup fragment, stored verbatim.
    #[serde(default, deserialize_with = "string_or_null")]
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Section appended by `add_section`.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_SECTION_TITLE, PLACEHOLDER_SECTION_CONTENT)
    }
}

/// Full résumé state: identity, contact line and ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Display name. Serialized as `name`.
    #[serde(rename = "name", default, deserialize_with = "string_or_null")]
    pub identity: String,
    /// Free-text contact line.
    #[serde(default, deserialize_with = "string_or_null")]
    pub contact: String,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(
        identity: impl Into<String>,
        contact: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            identity: identity.into(),
            contact: contact.into(),
            sections,
        }
    }

    /// Document produced by an explicit reset.
    pub fn blank() -> Self {
        Self::new(DEFAULT_IDENTITY, "", Vec::new())
    }

    /// Document shown when nothing usable is stored.
    pub fn starter() -> Self {
        Self::new(
            DEFAULT_IDENTITY,
            "you@example.com • City, Country",
            vec![
                Section::new(
                    "Summary",
                    "<p>A short opener about yourself — one paragraph.</p>",
                ),
                Section::new(
                    "Skills",
                    "<ul class=\"list\"><li>HTML, CSS, JavaScript</li><li>Responsive Design</li></ul>",
                ),
            ],
        )
    }

    /// Fuller example résumé offered by the "load sample" action.
    ///
    /// Section bodies are kept byte-for-byte from earlier releases; the
    /// header uses a placeholder person.
    pub fn sample() -> Self {
        Self::new(
            "Alex Morgan",
            "alex@example.com • +1 (555) 555-5555 • Sacramento, CA",
            vec![
                Section::new(
                    "Summary",
                    "<p>Passionate web developer with experience in building responsive front-end projects, dynamic dashboards, and user-focused interfaces.</p>",
                ),
                Section::new(
                    "Skills",
                    "<ul class=\"list\"><li>HTML5, CSS3, JavaScript</li><li>React, Vue basics</li><li>Responsive & accessible UI</li></ul>",
                ),
                Section::new(
                    "Experience",
                    "<p><strong>Freelance Web Developer</strong> — May 2021 — Present<br/>Built multiple client websites, optimized performance and SEO.</p>",
                ),
                Section::new(
                    "Education",
                    "<p><strong>B.Sc. Computer Science</strong>, Herat University (2016)</p>",
                ),
            ],
        )
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Normalizes a committed title: trimmed, `Untitled` when blank.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_SECTION_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reads an absent or `null` string field as empty.
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
