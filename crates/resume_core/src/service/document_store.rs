//! Document store: sole owner of the in-memory résumé.
//!
//! # Responsibility
//! - Apply every document mutation.
//! - After each successful mutation, schedule exactly one debounced save and
//!   notify observers exactly once, in mutation order.
//! - Mediate edit sessions through request/commit tickets instead of
//!   blocking dialogs.
//!
//! # Invariants
//! - Section order changes only through add/duplicate/remove/move/replace.
//! - Rejected operations leave the document and revision untouched and
//!   emit no notification.
//! - Reset clears the durable slot synchronously and is never debounced.

use crate::config::StoreConfig;
use crate::model::document::{normalize_title, Document, Section};
use crate::model::theme::Theme;
use crate::repo::slot_repo::{SlotResult, SlotStore};
use crate::schedule::clock::Clock;
use crate::service::exchange::{
    document_from_value, export_document, import_document, ExportArtifact, ValidationError,
};
use crate::service::persistence_gateway::PersistenceGateway;
use log::{debug, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Re-render hooks implemented by the presentation layer.
///
/// Both hooks fire once per successful mutation, sections first.
pub trait DocumentObserver {
    fn on_sections_changed(&mut self, _sections: &[Section]) {}
    fn on_document_changed(&mut self, _document: &Document) {}
}

/// Active-selection token for one edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTicket {
    session: Uuid,
    index: usize,
    revision: u64,
}

impl EditTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Values the presentation layer shows in its edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub ticket: EditTicket,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// No session is open, or the ticket belongs to a closed session.
    NoActiveEdit,
    /// The document changed since the session was opened.
    StaleTicket { opened_at: u64, current: u64 },
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveEdit => write!(f, "no active edit session for this ticket"),
            Self::StaleTicket { opened_at, current } => write!(
                f,
                "document changed since edit opened (revision {opened_at} -> {current})"
            ),
        }
    }
}

impl Error for EditError {}

/// Owner of one résumé document and its persistence channel.
pub struct DocumentStore<S: SlotStore, C: Clock> {
    document: Document,
    revision: u64,
    gateway: PersistenceGateway<S, C>,
    observers: Vec<Box<dyn DocumentObserver>>,
    active_edit: Option<EditTicket>,
}

impl<S: SlotStore, C: Clock> DocumentStore<S, C> {
    /// Opens a store from the durable slot, or the starter document when the
    /// slot is empty or unusable.
    pub fn open(config: &StoreConfig, slots: S, clock: C) -> Self {
        let gateway = PersistenceGateway::new(config, slots, clock);
        let loaded = gateway.load();
        info!(
            "event=store_open module=store status=ok restored={} sections={}",
            loaded.found,
            loaded.document.sections.len()
        );
        Self::from_parts(loaded.document, gateway)
    }

    /// Creates a store around `document` without reading storage.
    pub fn with_document(config: &StoreConfig, slots: S, clock: C, document: Document) -> Self {
        Self::from_parts(document, PersistenceGateway::new(config, slots, clock))
    }

    fn from_parts(document: Document, gateway: PersistenceGateway<S, C>) -> Self {
        Self {
            document,
            revision: 0,
            gateway,
            observers: Vec::new(),
            active_edit: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Monotonic counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn gateway(&self) -> &PersistenceGateway<S, C> {
        &self.gateway
    }

    pub fn subscribe(&mut self, observer: Box<dyn DocumentObserver>) {
        self.observers.push(observer);
    }

    /// Appends a placeholder section and returns its index.
    pub fn add_section(&mut self) -> usize {
        self.document.sections.push(Section::placeholder());
        let index = self.document.sections.len() - 1;
        debug!("event=doc_mutation module=store op=add_section index={index}");
        self.commit_change();
        index
    }

    /// Replaces title and content of the section at `index`.
    ///
    /// Title is trimmed and defaults to `Untitled`; content is stored
    /// verbatim. Returns `false` without side effects when out of range.
    pub fn edit_section(&mut self, index: usize, title: &str, content: &str) -> bool {
        let Some(section) = self.document.sections.get_mut(index) else {
            debug!("event=doc_mutation module=store op=edit_section status=rejected index={index}");
            return false;
        };
        section.title = normalize_title(title);
        section.content = content.to_string();
        debug!("event=doc_mutation module=store op=edit_section index={index}");
        self.commit_change();
        true
    }

    /// Inserts an independent copy of the section at `index` right after it.
    pub fn duplicate_section(&mut self, index: usize) -> bool {
        let Some(section) = self.document.sections.get(index).cloned() else {
            return false;
        };
        self.document.sections.insert(index + 1, section);
        debug!("event=doc_mutation module=store op=duplicate_section index={index}");
        self.commit_change();
        true
    }

    /// Deletes the section at `index`. Confirmation is the caller's concern.
    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        if index >= self.document.sections.len() {
            return None;
        }
        let removed = self.document.sections.remove(index);
        debug!("event=doc_mutation module=store op=remove_section index={index}");
        self.commit_change();
        Some(removed)
    }

    /// Moves the section at `from` to `to`, where `to` is read in the list
    /// after removal.
    ///
    /// No-op returning `false` when `from == to` or either index is outside
    /// `[0, len)`.
    pub fn move_section(&mut self, from: usize, to: usize) -> bool {
        let len = self.document.sections.len();
        if from == to || from >= len || to >= len {
            debug!(
                "event=doc_mutation module=store op=move_section status=rejected from={from} to={to} len={len}"
            );
            return false;
        }
        let moved = self.document.sections.remove(from);
        self.document.sections.insert(to, moved);
        debug!("event=doc_mutation module=store op=move_section from={from} to={to}");
        self.commit_change();
        true
    }

    /// Completes a drag-and-drop gesture.
    ///
    /// `payload` is the transient drag data carrying the source index as a
    /// base-10 integer; anything else is rejected.
    pub fn drop_section(&mut self, payload: &str, to: usize) -> bool {
        match parse_drag_index(payload) {
            Some(from) => self.move_section(from, to),
            None => {
                debug!("event=doc_mutation module=store op=drop_section status=rejected reason=bad_payload");
                false
            }
        }
    }

    /// Updates the header. `None` keeps the current value; values are trimmed.
    pub fn edit_header(&mut self, name: Option<&str>, contact: Option<&str>) -> bool {
        if name.is_none() && contact.is_none() {
            return false;
        }
        if let Some(name) = name {
            self.document.identity = name.trim().to_string();
        }
        if let Some(contact) = contact {
            self.document.contact = contact.trim().to_string();
        }
        debug!("event=doc_mutation module=store op=edit_header");
        self.commit_change();
        true
    }

    /// Replaces the document with the built-in sample résumé.
    pub fn load_sample(&mut self) {
        self.replace_with(Document::sample());
        debug!("event=doc_mutation module=store op=load_sample");
    }

    /// Atomically replaces the whole document with `candidate`.
    ///
    /// # Errors
    /// - `ValidationError` when `candidate` has no usable `sections`; the
    ///   current document is left untouched.
    pub fn replace_document(&mut self, candidate: Value) -> Result<(), ValidationError> {
        let document = document_from_value(candidate)?;
        self.replace_with(document);
        Ok(())
    }

    /// Parses `raw` as an exported file and replaces the document with it.
    ///
    /// Overlapping imports resolve as last-completion-wins.
    ///
    /// # Errors
    /// - `ValidationError` describing why the text was rejected; no mutation.
    pub fn import_json(&mut self, raw: &str) -> Result<(), ValidationError> {
        match import_document(raw) {
            Ok(document) => {
                info!(
                    "event=doc_import module=store status=ok sections={}",
                    document.sections.len()
                );
                self.replace_with(document);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=doc_import module=store status=rejected error_kind={}",
                    err.kind()
                );
                Err(err)
            }
        }
    }

    /// Pretty-printed JSON artifact of the current document.
    pub fn export_json(&self) -> ExportArtifact {
        export_document(&self.document)
    }

    /// Resets to the blank document and clears the durable slot now.
    ///
    /// The in-memory reset always happens.
    ///
    /// # Errors
    /// - Returns the slot error when clearing storage failed.
    pub fn reset_document(&mut self) -> SlotResult<()> {
        self.document = Document::blank();
        self.revision += 1;
        self.active_edit = None;
        let cleared = self.gateway.clear_document();
        match &cleared {
            Ok(()) => info!("event=doc_reset module=store status=ok"),
            Err(err) => warn!("event=doc_reset module=store status=error error={err}"),
        }
        self.notify();
        cleared
    }

    /// Writes the current document immediately (explicit user save).
    pub fn save_now(&mut self) -> SlotResult<()> {
        self.gateway.save_now(&self.document)
    }

    /// Timer callback: performs the debounced write once its deadline passed.
    pub fn tick(&mut self) -> bool {
        self.gateway.flush_due(&self.document)
    }

    /// Deadline the host should arm its timer for, if any.
    pub fn pending_save_deadline(&self) -> Option<u64> {
        self.gateway.pending_deadline()
    }

    pub fn theme_preference(&self) -> Theme {
        self.gateway.theme_preference()
    }

    pub fn set_theme_preference(&self, name: &str) -> Theme {
        self.gateway.set_theme_preference(name)
    }

    /// Opens an edit session for the section at `index`.
    ///
    /// Opening a new session closes any previous one.
    pub fn begin_edit(&mut self, index: usize) -> Option<EditRequest> {
        let section = self.document.sections.get(index)?;
        let ticket = EditTicket {
            session: Uuid::new_v4(),
            index,
            revision: self.revision,
        };
        self.active_edit = Some(ticket);
        Some(EditRequest {
            ticket,
            title: section.title.clone(),
            content: section.content.clone(),
        })
    }

    /// Commits the values entered for an open edit session.
    ///
    /// # Errors
    /// - `NoActiveEdit` when `ticket` is not the open session.
    /// - `StaleTicket` when the document changed after the session opened.
    pub fn commit_edit(
        &mut self,
        ticket: &EditTicket,
        title: &str,
        content: &str,
    ) -> Result<(), EditError> {
        if self.active_edit.as_ref() != Some(ticket) {
            return Err(EditError::NoActiveEdit);
        }
        if ticket.revision != self.revision {
            self.active_edit = None;
            return Err(EditError::StaleTicket {
                opened_at: ticket.revision,
                current: self.revision,
            });
        }
        self.active_edit = None;
        self.edit_section(ticket.index, title, content);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.active_edit = None;
    }

    fn replace_with(&mut self, document: Document) {
        self.document = document;
        self.commit_change();
    }

    fn commit_change(&mut self) {
        self.revision += 1;
        self.gateway.schedule_save();
        self.notify();
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_sections_changed(&self.document.sections);
            observer.on_document_changed(&self.document);
        }
    }
}

/// Parses a drag payload as a non-negative base-10 index.
pub fn parse_drag_index(payload: &str) -> Option<usize> {
    payload.trim().parse::<usize>().ok()
}
