//! Time sources and save scheduling.
//!
//! # Responsibility
//! - Abstract "now" so debounce behavior is testable without real timers.
//! - Model each save channel as explicit `{pending_deadline, cancel()}` state.

pub mod clock;
pub mod debounce;
