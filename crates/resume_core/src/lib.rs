//! Core document model and synchronization for the résumé editor.
//! This crate is the single source of truth for document invariants; UI
//! layers render projections and call back into `DocumentStore`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod view;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Document, Section};
pub use model::theme::Theme;
pub use repo::slot_repo::{MemorySlotStore, SlotError, SlotResult, SlotStore, SqliteSlotStore};
pub use schedule::clock::{Clock, ManualClock, SystemClock};
pub use schedule::debounce::Debouncer;
pub use service::document_store::{
    parse_drag_index, DocumentObserver, DocumentStore, EditError, EditRequest, EditTicket,
};
pub use service::exchange::{
    export_document, import_document, ExportArtifact, ValidationError, EXPORT_FILE_NAME,
    EXPORT_MIME_TYPE,
};
pub use service::persistence_gateway::{LoadedDocument, PersistenceGateway};
pub use view::projection::{render, render_section_list, ResumeView, SectionListItem};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
