//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by pane (`lake`, `library`) so components depend on small
//! focused models; `selection` is the only code that touches both.

pub mod lake;
pub mod library;
pub mod pending;
pub mod selection;
