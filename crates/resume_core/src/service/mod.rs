//! Core use-case services.
//!
//! # Responsibility
//! - Own the document and route every mutation through one store.
//! - Keep UI layers decoupled from storage and serialization details.

pub mod document_store;
pub mod exchange;
pub mod persistence_gateway;
