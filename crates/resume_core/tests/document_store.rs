use resume_core::{
    Document, DocumentObserver, DocumentStore, EditError, ManualClock, MemorySlotStore, Section,
    StoreConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

type TestStore = DocumentStore<Rc<MemorySlotStore>, ManualClock>;

fn store_with(document: Document) -> (TestStore, Rc<MemorySlotStore>, ManualClock) {
    let slots = Rc::new(MemorySlotStore::new());
    let clock = ManualClock::new();
    let store = DocumentStore::with_document(
        &StoreConfig::default(),
        Rc::clone(&slots),
        clock.clone(),
        document,
    );
    (store, slots, clock)
}

fn three_sections() -> Document {
    Document::new(
        "A",
        "x",
        vec![
            Section::new("S0", "<p>0</p>"),
            Section::new("S1", "<p>1</p>"),
            Section::new("S2", "<p>2</p>"),
        ],
    )
}

fn titles(store: &TestStore) -> Vec<&str> {
    store
        .document()
        .sections
        .iter()
        .map(|section| section.title.as_str())
        .collect()
}

#[derive(Default)]
struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl DocumentObserver for Recorder {
    fn on_sections_changed(&mut self, sections: &[Section]) {
        self.events
            .borrow_mut()
            .push(format!("sections:{}", sections.len()));
    }

    fn on_document_changed(&mut self, document: &Document) {
        self.events
            .borrow_mut()
            .push(format!("document:{}", document.identity));
    }
}

#[test]
fn add_section_appends_placeholder_and_returns_index() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    let index = store.add_section();

    assert_eq!(index, 3);
    assert_eq!(store.document().sections[3], Section::placeholder());
    assert_eq!(store.document().sections[3].title, "New Section");
}

#[test]
fn edit_section_trims_title_and_keeps_content_verbatim() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    assert!(store.edit_section(1, "  Skills  ", "  <b>raw</b>\n"));
    assert_eq!(store.document().sections[1].title, "Skills");
    assert_eq!(store.document().sections[1].content, "  <b>raw</b>\n");

    assert!(store.edit_section(1, " \t ", ""));
    assert_eq!(store.document().sections[1].title, "Untitled");
    assert_eq!(titles(&store), vec!["S0", "Untitled", "S2"]);
}

#[test]
fn edit_section_out_of_range_is_noop() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let before = store.document().clone();

    assert!(!store.edit_section(7, "X", "Y"));
    assert_eq!(store.document(), &before);
    assert_eq!(store.revision(), 0);
    assert_eq!(store.pending_save_deadline(), None);
}

#[test]
fn duplicate_inserts_independent_copy_after_original() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let original = store.document().sections[1].clone();

    assert!(store.duplicate_section(1));
    assert_eq!(titles(&store), vec!["S0", "S1", "S1", "S2"]);
    assert_eq!(store.document().sections[2], original);

    store.edit_section(2, "S1 copy", "<p>changed</p>");
    assert_eq!(store.document().sections[1], original);
    assert_eq!(store.document().sections[2].content, "<p>changed</p>");
}

#[test]
fn remove_section_returns_removed_value() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    let removed = store.remove_section(0).unwrap();
    assert_eq!(removed.title, "S0");
    assert_eq!(titles(&store), vec!["S1", "S2"]);
    assert!(store.remove_section(5).is_none());
}

#[test]
fn move_section_uses_post_removal_index_space() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    assert!(store.move_section(0, 2));
    assert_eq!(titles(&store), vec!["S1", "S2", "S0"]);

    assert!(store.move_section(2, 0));
    assert_eq!(titles(&store), vec!["S0", "S1", "S2"]);
}

#[test]
fn move_section_rejects_same_or_out_of_range_indices() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let before = store.document().clone();

    assert!(!store.move_section(1, 1));
    assert!(!store.move_section(3, 0));
    assert!(!store.move_section(0, 3));
    assert!(!store.drop_section("NaN", 0));
    assert!(!store.drop_section("-1", 0));

    assert_eq!(store.document(), &before);
    assert_eq!(store.revision(), 0);
}

#[test]
fn drop_section_parses_drag_payload() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    assert!(store.drop_section("2", 0));
    assert_eq!(titles(&store), vec!["S2", "S0", "S1"]);
}

#[test]
fn observers_fire_once_per_mutation_in_order() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let recorder = Recorder::default();
    let events = Rc::clone(&recorder.events);
    store.subscribe(Box::new(recorder));

    store.add_section();
    store.move_section(0, 0);
    store.edit_header(Some("  B "), None);

    assert_eq!(
        events.borrow().as_slice(),
        ["sections:4", "document:A", "sections:4", "document:B"]
    );
}

#[test]
fn edit_header_keeps_cancelled_fields() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    assert!(store.edit_header(None, Some("  new@example.com ")));
    assert_eq!(store.document().identity, "A");
    assert_eq!(store.document().contact, "new@example.com");
    assert!(!store.edit_header(None, None));
}

#[test]
fn replace_document_without_sections_is_rejected() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let before = store.document().clone();

    let err = store
        .replace_document(serde_json::json!({"name": "Z", "contact": "z"}))
        .unwrap_err();

    assert!(err.to_string().contains("sections"));
    assert_eq!(store.document(), &before);
}

#[test]
fn replace_document_swaps_whole_document() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    store
        .replace_document(serde_json::json!({
            "name": "Z",
            "contact": "z",
            "sections": [{"title": "Only", "content": "<p>o</p>"}]
        }))
        .unwrap();

    assert_eq!(
        store.document(),
        &Document::new("Z", "z", vec![Section::new("Only", "<p>o</p>")])
    );
}

#[test]
fn load_sample_replaces_document_and_schedules_save() {
    let (mut store, _slots, _clock) = store_with(Document::blank());

    store.load_sample();

    assert_eq!(store.document(), &Document::sample());
    assert!(store.pending_save_deadline().is_some());
}

#[test]
fn edit_session_commits_through_ticket() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    let request = store.begin_edit(2).unwrap();
    assert_eq!(request.title, "S2");
    assert_eq!(request.content, "<p>2</p>");
    assert_eq!(request.ticket.index(), 2);

    store
        .commit_edit(&request.ticket, "", "<p>new</p>")
        .unwrap();
    assert_eq!(store.document().sections[2], Section::new("Untitled", "<p>new</p>"));

    let err = store
        .commit_edit(&request.ticket, "again", "")
        .unwrap_err();
    assert_eq!(err, EditError::NoActiveEdit);
}

#[test]
fn edit_session_rejects_stale_ticket() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    let request = store.begin_edit(0).unwrap();
    store.move_section(0, 2);
    let before = store.document().clone();

    let err = store
        .commit_edit(&request.ticket, "Changed", "")
        .unwrap_err();
    assert!(matches!(err, EditError::StaleTicket { .. }));
    assert_eq!(store.document(), &before);
}

#[test]
fn cancelled_edit_session_cannot_commit() {
    let (mut store, _slots, _clock) = store_with(three_sections());

    let request = store.begin_edit(1).unwrap();
    store.cancel_edit();

    assert_eq!(
        store.commit_edit(&request.ticket, "x", "y").unwrap_err(),
        EditError::NoActiveEdit
    );
    assert!(store.begin_edit(9).is_none());
}

#[test]
fn end_to_end_add_move_export_import() {
    let (mut store, _slots, _clock) = store_with(Document::new(
        "A",
        "x",
        vec![Section::new("S1", "<p>c1</p>")],
    ));

    store.add_section();
    assert_eq!(store.document().sections.len(), 2);
    assert_eq!(store.document().sections[1], Section::placeholder());

    assert!(store.move_section(1, 0));
    assert_eq!(
        store.document().sections,
        vec![Section::placeholder(), Section::new("S1", "<p>c1</p>")]
    );

    let exported = store.export_json();
    let (mut fresh, _fresh_slots, _fresh_clock) = store_with(Document::blank());
    fresh.import_json(&exported.contents).unwrap();

    assert_eq!(fresh.document(), store.document());
}

#[test]
fn failed_import_leaves_document_and_schedule_untouched() {
    let (mut store, _slots, _clock) = store_with(three_sections());
    let before = store.document().clone();

    let err = store.import_json("{\"name\": \"Z\"}").unwrap_err();

    assert!(err.to_string().contains("missing `sections`"));
    assert_eq!(store.document(), &before);
    assert_eq!(store.pending_save_deadline(), None);
}
