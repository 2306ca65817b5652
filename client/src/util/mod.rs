//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and request plumbing
//! from page and component logic to improve reuse and testability.

pub mod handoff;
pub mod library_actions;
pub mod storage;
