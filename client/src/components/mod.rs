//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the tree and library panes while reading/writing shared
//! state from Leptos context providers.

pub mod field_editor;
pub mod library_selector;
pub mod library_view;
pub mod pending_entry;
pub mod tree_view;
