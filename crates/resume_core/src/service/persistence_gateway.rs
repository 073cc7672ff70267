//! Durable snapshotting of the document and theme preference.
//!
//! # Responsibility
//! - Serialize/deserialize the document under a fixed slot key.
//! - Debounce document writes through a single-deadline save channel.
//! - Persist the theme preference on its own key, written immediately.
//!
//! # Invariants
//! - At most one document write is pending at any instant.
//! - A successful `save_now` cancels the pending write; a failed one keeps it.
//! - Write failures are logged and never propagate from the debounced path.
//! - Unreadable or structurally invalid snapshots load as not-found.

use crate::config::StoreConfig;
use crate::model::document::Document;
use crate::model::theme::Theme;
use crate::repo::slot_repo::{SlotResult, SlotStore};
use crate::schedule::clock::Clock;
use crate::schedule::debounce::Debouncer;
use crate::service::exchange::{import_document, to_snapshot_json};
use log::{debug, info, warn};

/// Result of reading the document slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Stored document, or the built-in starter when nothing usable was found.
    pub document: Document,
    pub found: bool,
}

/// Gateway between the in-memory document and durable slots.
pub struct PersistenceGateway<S: SlotStore, C: Clock> {
    slots: S,
    clock: C,
    document_key: String,
    theme_key: String,
    save_channel: Debouncer,
}

impl<S: SlotStore, C: Clock> PersistenceGateway<S, C> {
    pub fn new(config: &StoreConfig, slots: S, clock: C) -> Self {
        Self {
            slots,
            clock,
            document_key: config.storage_key.clone(),
            theme_key: config.theme_key(),
            save_channel: Debouncer::new(config.save_debounce_ms),
        }
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Cancels any pending write and restarts the quiet period.
    ///
    /// Returns the new deadline in clock milliseconds.
    pub fn schedule_save(&mut self) -> u64 {
        self.save_channel.schedule(self.clock.now_ms())
    }

    pub fn pending_deadline(&self) -> Option<u64> {
        self.save_channel.pending_deadline()
    }

    /// Writes `document` if the pending deadline has elapsed.
    ///
    /// Returns `true` when a write was attempted. Failures are logged only.
    pub fn flush_due(&mut self, document: &Document) -> bool {
        if !self.save_channel.fire_if_due(self.clock.now_ms()) {
            return false;
        }
        if let Err(err) = self.write_document(document) {
            warn!(
                "event=doc_save module=persistence status=error trigger=debounce key={} error={}",
                self.document_key, err
            );
        }
        true
    }

    /// Writes `document` immediately.
    ///
    /// On success the pending debounced write is cancelled, since the
    /// durable state already matches memory.
    ///
    /// # Errors
    /// - Returns the slot error; the pending write stays armed so a later
    ///   tick retries.
    pub fn save_now(&mut self, document: &Document) -> SlotResult<()> {
        match self.write_document(document) {
            Ok(()) => {
                self.save_channel.cancel();
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=doc_save module=persistence status=error trigger=explicit key={} error={}",
                    self.document_key, err
                );
                Err(err)
            }
        }
    }

    /// Reads the document slot, falling back to the starter document.
    pub fn load(&self) -> LoadedDocument {
        let raw = match self.slots.read_slot(&self.document_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=doc_load module=persistence status=empty key={}",
                    self.document_key
                );
                return not_found();
            }
            Err(err) => {
                warn!(
                    "event=doc_load module=persistence status=error key={} error={}",
                    self.document_key, err
                );
                return not_found();
            }
        };

        match import_document(&raw) {
            Ok(document) => {
                info!(
                    "event=doc_load module=persistence status=ok key={} sections={}",
                    self.document_key,
                    document.sections.len()
                );
                LoadedDocument {
                    document,
                    found: true,
                }
            }
            Err(err) => {
                warn!(
                    "event=doc_load module=persistence status=invalid key={} error_kind={}",
                    self.document_key,
                    err.kind()
                );
                not_found()
            }
        }
    }

    /// Cancels any pending write and removes the document slot.
    pub fn clear_document(&mut self) -> SlotResult<()> {
        self.save_channel.cancel();
        self.slots.clear_slot(&self.document_key)?;
        info!(
            "event=slot_clear module=persistence status=ok key={}",
            self.document_key
        );
        Ok(())
    }

    /// Stored theme, or `Theme::Default` when missing, invalid or unreadable.
    pub fn theme_preference(&self) -> Theme {
        match self.slots.read_slot(&self.theme_key) {
            Ok(Some(raw)) => Theme::parse_lenient(&raw),
            Ok(None) => Theme::Default,
            Err(err) => {
                warn!(
                    "event=slot_read module=persistence status=error key={} error={}",
                    self.theme_key, err
                );
                Theme::Default
            }
        }
    }

    /// Normalizes `name` and writes it immediately. Failures are logged only.
    pub fn set_theme_preference(&self, name: &str) -> Theme {
        let theme = Theme::parse_lenient(name);
        match self.slots.write_slot(&self.theme_key, theme.as_str()) {
            Ok(()) => info!(
                "event=theme_save module=persistence status=ok theme={}",
                theme.as_str()
            ),
            Err(err) => warn!(
                "event=theme_save module=persistence status=error key={} error={}",
                self.theme_key, err
            ),
        }
        theme
    }

    fn write_document(&self, document: &Document) -> SlotResult<()> {
        let payload = to_snapshot_json(document);
        self.slots.write_slot(&self.document_key, &payload)?;
        info!(
            "event=doc_save module=persistence status=ok key={} sections={} bytes={}",
            self.document_key,
            document.sections.len(),
            payload.len()
        );
        Ok(())
    }
}

fn not_found() -> LoadedDocument {
    LoadedDocument {
        document: Document::starter(),
        found: false,
    }
}
