//! Moves files between the tree and the pending list.
//!
//! SYSTEM CONTEXT
//! ==============
//! A tree file is either visible in the lake or pending in the library panel,
//! never both. Both halves change together here so callers cannot update one
//! side without the other.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::state::lake::LakeState;
use crate::state::library::LibraryState;

/// Hide `path` in the tree and add it to the pending list. Returns `false`
/// and changes nothing if the file is already hidden or pending.
pub fn select_file(lake: &mut LakeState, library: &mut LibraryState, path: &str) -> bool {
    if lake.is_hidden(path) || library.is_pending(path) {
        return false;
    }
    lake.hide(path);
    library.add_pending(path);
    true
}

/// Remove `path` from the pending list and show it in the tree again.
/// Returns `false` and changes nothing if it was not pending.
pub fn unselect_file(lake: &mut LakeState, library: &mut LibraryState, path: &str) -> bool {
    if !library.remove_pending(path) {
        return false;
    }
    lake.show(path);
    true
}
