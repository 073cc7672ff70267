//! Pure projections from `Document` to view models.
//!
//! # Responsibility
//! - Give any UI layer a render-ready shape without touching the store.
//!
//! # Invariants
//! - Projections never mutate or normalize the document itself.

pub mod projection;
