use resume_core::{export_document, import_document, Document, Section, ValidationError};

fn tricky_document() -> Document {
    Document::new(
        "Zoë \"Z\" Ångström",
        "z@example.com • +1 (555) 555-5555\nline two",
        vec![
            Section::new("Summary", "<p>Unicode ✓ and <em>markup</em> &amp; entities</p>"),
            Section::new("", ""),
            Section::new("Skills", "<ul class=\"list\"><li>Rust</li></ul>"),
            Section::new("Summary", "<p>duplicate title, different body</p>"),
        ],
    )
}

#[test]
fn export_then_import_preserves_every_field_and_order() {
    let doc = tricky_document();
    let artifact = export_document(&doc);

    let imported = import_document(&artifact.contents).unwrap();
    assert_eq!(imported, doc);
}

#[test]
fn export_is_deterministic_and_has_no_extra_fields() {
    let doc = tricky_document();
    let first = export_document(&doc).contents;
    let second = export_document(&doc).contents;
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["contact", "name", "sections"]);
    assert_eq!(value["sections"][2]["title"], "Skills");
    assert_eq!(value["sections"].as_array().unwrap().len(), 4);
}

#[test]
fn import_accepts_files_written_by_older_exports() {
    let raw = r#"{
  "name": "Your Name",
  "contact": "you@example.com • City, Country",
  "sections": [
    { "title": "Summary", "content": "<p>A short opener.</p>" }
  ],
  "unknown": true
}"#;

    let doc = import_document(raw).unwrap();
    assert_eq!(doc.identity, "Your Name");
    assert_eq!(doc.sections, vec![Section::new("Summary", "<p>A short opener.</p>")]);
}

#[test]
fn import_without_sections_reports_descriptive_error() {
    let err = import_document(r#"{"name":"A","contact":"x"}"#).unwrap_err();

    assert!(matches!(err, ValidationError::MissingSections));
    assert_eq!(
        err.to_string(),
        "invalid file format: missing `sections` field"
    );
}

#[test]
fn empty_section_list_is_valid() {
    let doc = import_document(r#"{"sections":[]}"#).unwrap();
    assert!(doc.sections.is_empty());
}

#[test]
fn import_reads_null_strings_as_empty() {
    let doc = import_document(
        r#"{"name":"A","contact":"x","sections":[{"title":"S","content":null}]}"#,
    )
    .unwrap();
    assert_eq!(doc.sections, vec![Section::new("S", "")]);

    let doc = import_document(r#"{"name":null,"contact":null,"sections":[]}"#).unwrap();
    assert_eq!(doc, Document::new("", "", Vec::new()));
}

#[test]
fn null_content_renders_placeholder_body() {
    let doc = import_document(r#"{"sections":[{"title":null,"content":null}]}"#).unwrap();
    let view = resume_core::render(&doc);

    assert_eq!(view.name_html, "Your Name");
    assert_eq!(view.sections[0].title_html, "Untitled");
    assert_eq!(view.sections[0].body_html, "<p></p>");
}
