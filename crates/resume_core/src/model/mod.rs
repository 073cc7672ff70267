//! Résumé domain model.
//!
//! # Responsibility
//! - Define the document, section and theme values used by core logic.
//!
//! # Invariants
//! - The document is always replaced as a whole; there is no partial merge.

pub mod document;
pub mod theme;
