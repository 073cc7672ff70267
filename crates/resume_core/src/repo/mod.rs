//! Durable slot abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value contract used for document and theme snapshots.
//! - Isolate SQLite details from the persistence gateway.

pub mod slot_repo;
