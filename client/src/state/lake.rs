//! File-tree ("lake") state for the left pane.
//!
//! SYSTEM CONTEXT
//! ==============
//! The tree is fetched once per page load. Files moved into the pending list
//! stay in the tree model but are tracked in `hidden` so the view can toggle
//! them without re-fetching.

#[cfg(test)]
#[path = "lake_test.rs"]
mod lake_test;

use std::collections::HashSet;

use crate::net::types::TreeNode;

/// Tree listing plus per-file visibility.
#[derive(Clone, Debug, Default)]
pub struct LakeState {
    /// Listing from `GET /tree`, once loaded.
    pub tree: Option<TreeNode>,
    /// True while the tree request is in flight.
    pub loading: bool,
    /// Last listing failure, shown in place of the tree.
    pub error: Option<String>,
    /// Full paths of files currently hidden because they are pending.
    pub hidden: HashSet<String>,
}

impl LakeState {
    /// Store a freshly loaded tree and clear loading/error flags.
    pub fn apply_tree(&mut self, tree: TreeNode) {
        self.tree = Some(tree);
        self.loading = false;
        self.error = None;
    }

    /// Record a listing failure.
    pub fn apply_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    #[must_use]
    pub fn is_hidden(&self, path: &str) -> bool {
        self.hidden.contains(path)
    }

    /// Hide `path`. Returns `false` when it was already hidden.
    pub fn hide(&mut self, path: &str) -> bool {
        self.hidden.insert(path.to_owned())
    }

    /// Show `path` again. Returns `false` when it was not hidden.
    pub fn show(&mut self, path: &str) -> bool {
        self.hidden.remove(path)
    }

    /// Number of tree files not currently hidden.
    #[cfg(test)]
    pub fn visible_file_count(&self) -> usize {
        self.tree.as_ref().map_or(0, |tree| {
            tree.file_paths("")
                .iter()
                .filter(|path| !self.hidden.contains(path.as_str()))
                .count()
        })
    }
}
