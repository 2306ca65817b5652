//! Library panel state: spec cache, breadcrumb selector levels, and the
//! pending file list.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server responses flow into this model; the view only renders it. Every
//! mutation that needs a request returns the request body, and the matching
//! `apply_*` method folds the echoed response back in.
//!
//! DESIGN
//! ======
//! Listing and create requests carry a sequence number. A response whose
//! sequence is older than the latest request no longer owns the breadcrumb
//! and is only folded into the cache.
//!
//! Field PATCHes are numbered too. A new field set is computed from the
//! newest one sent rather than the cached echo, so quick successive edits
//! build on each other, and an echo older than one already applied is ignored.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use std::collections::HashMap;

use crate::net::types::{LibraryId, LibraryPatch, LibraryRow, LibrarySpec, NewLibrary, NewRecord};
use crate::state::pending::PendingEntry;

/// Label shown on a level before a child has been chosen at it.
pub const UNSELECTED_LABEL: &str = "+";

/// A child library offered in a level's popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryTarget {
    pub id: LibraryId,
    pub name: String,
}

/// One breadcrumb segment, listing the children of `source_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorLevel {
    /// Library whose children this level chooses between.
    pub source_id: LibraryId,
    /// Name of the chosen child, or [`UNSELECTED_LABEL`].
    pub label: String,
    pub targets: Vec<LibraryTarget>,
    pub popup_open: bool,
    /// True while the inline create form replaces the label.
    pub creating: bool,
}

impl SelectorLevel {
    #[must_use]
    pub fn for_spec(spec: &LibrarySpec) -> Self {
        Self {
            source_id: spec.id,
            label: UNSELECTED_LABEL.to_owned(),
            targets: spec
                .libraries
                .iter()
                .map(|child| LibraryTarget { id: child.id, name: child.label() })
                .collect(),
            popup_open: false,
            creating: false,
        }
    }

    pub fn add_target(&mut self, id: LibraryId, name: String) {
        self.targets.push(LibraryTarget { id, name });
    }

    fn settle(&mut self, label: &str) {
        self.popup_open = false;
        self.creating = false;
        self.label = label.to_owned();
    }
}

/// Everything the library panel renders.
#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    /// Known library specs keyed by id.
    pub cache: HashMap<LibraryId, LibrarySpec>,
    /// Library that field edits, format edits and links apply to.
    pub current_id: Option<LibraryId>,
    /// Breadcrumb levels from the root to the current library.
    pub levels: Vec<SelectorLevel>,
    /// Files selected from the tree, in selection order.
    pub pending: Vec<PendingEntry>,
    /// Sequence of the newest listing/create request.
    pub listing_seq: u64,
    /// True while the newest listing/create request is in flight.
    pub loading: bool,
    /// Most recent request failure, shown as a dismissible banner.
    pub error: Option<String>,
    /// Sequence of the newest PATCH request.
    pub patch_seq: u64,
    /// Field set of the newest field PATCH still awaiting its echo, as
    /// `(library, seq, fields)`.
    pub unconfirmed_fields: Option<(LibraryId, u64, Vec<String>)>,
    /// Newest PATCH sequence whose echo was applied, per library.
    applied_patch: HashMap<LibraryId, u64>,
}

impl LibraryState {
    #[must_use]
    pub fn current(&self) -> Option<&LibrarySpec> {
        self.current_id.and_then(|id| self.cache.get(&id))
    }

    /// Field names of the current library, empty when none is loaded.
    #[must_use]
    pub fn current_fields(&self) -> Vec<String> {
        self.current().map(|spec| spec.fields.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn current_format(&self) -> String {
        self.current().and_then(|spec| spec.format.clone()).unwrap_or_default()
    }

    // =========================================================================
    // LISTING
    // =========================================================================

    /// Start a new listing/create request and return its sequence number.
    pub fn begin_listing(&mut self) -> u64 {
        self.listing_seq += 1;
        self.loading = true;
        self.listing_seq
    }

    /// Apply a `GET /list_library` response. The spec becomes current and a
    /// level listing its children is pushed. Returns `false` for a stale
    /// response, which only refreshes the cache.
    pub fn apply_listing(&mut self, seq: u64, spec: LibrarySpec) -> bool {
        let fresh = seq == self.listing_seq;
        if fresh {
            self.loading = false;
            self.levels.push(SelectorLevel::for_spec(&spec));
            self.current_id = Some(spec.id);
        }
        self.cache.insert(spec.id, spec);
        if fresh {
            self.reattach_pending();
        }
        fresh
    }

    /// Record a failed request. `seq` is set for listing/create requests;
    /// when it is the newest one, the last remaining level goes back to
    /// unselected and its source library becomes current again.
    pub fn apply_failure(&mut self, seq: Option<u64>, message: String) {
        if seq == Some(self.listing_seq) {
            self.loading = false;
            self.fall_back_to_last_level();
        }
        self.error = Some(message);
    }

    fn fall_back_to_last_level(&mut self) {
        let Some(level) = self.levels.last_mut() else {
            return;
        };
        level.settle(UNSELECTED_LABEL);
        self.current_id = Some(level.source_id);
        self.reattach_pending();
    }

    // =========================================================================
    // BREADCRUMB
    // =========================================================================

    /// Drop every level after `index`.
    pub fn truncate_after(&mut self, index: usize) {
        self.levels.truncate(index + 1);
    }

    /// Choose child `target_id` at level `index`. Deeper levels are dropped
    /// and the sequence for the follow-up listing is returned.
    pub fn select_child(&mut self, index: usize, target_id: LibraryId, name: &str) -> Option<u64> {
        let level = self.levels.get_mut(index)?;
        if !level.targets.iter().any(|t| t.id == target_id) {
            return None;
        }
        level.settle(name);
        self.truncate_after(index);
        Some(self.begin_listing())
    }

    /// Prepare creation of child `name` under level `index`'s source library.
    /// Deeper levels are dropped and the source becomes current. Blank names
    /// and unknown sources yield `None` and change nothing.
    pub fn create_child(&mut self, index: usize, name: &str) -> Option<(u64, NewLibrary)> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let source_id = self.levels.get(index)?.source_id;
        let source = self.cache.get(&source_id)?;
        let body = NewLibrary {
            location: source.child_location(name),
            name: name.to_owned(),
            parent_id: source.id,
            fields: source.fields.clone(),
            format: source.format.clone(),
        };
        self.levels[index].settle(name);
        self.truncate_after(index);
        self.current_id = Some(source_id);
        self.reattach_pending();
        Some((self.begin_listing(), body))
    }

    /// Apply the echo of `PUT /library` for a child created at level `index`.
    /// The new library is always cached and listed under its parent; when the
    /// response is fresh it also becomes current and gets its own level.
    pub fn apply_created(&mut self, seq: u64, index: usize, row: LibraryRow) -> bool {
        let spec = LibrarySpec::from_row(row);
        let parent_id = spec.parent_id.or_else(|| self.levels.get(index).map(|l| l.source_id));
        if let Some(parent) = parent_id.and_then(|id| self.cache.get_mut(&id)) {
            parent.libraries.push(spec.clone());
        }
        if let Some(level) = self.levels.get_mut(index) {
            if Some(level.source_id) == parent_id {
                level.add_target(spec.id, spec.label());
            }
        }

        let fresh = seq == self.listing_seq;
        if fresh {
            self.loading = false;
            self.levels.push(SelectorLevel::for_spec(&spec));
            self.current_id = Some(spec.id);
        }
        self.cache.insert(spec.id, spec);
        if fresh {
            self.reattach_pending();
        }
        fresh
    }

    pub fn toggle_popup(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            level.popup_open = !level.popup_open;
        }
    }

    pub fn close_popup(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            level.popup_open = false;
        }
    }

    /// Swap the level label for the inline create form.
    pub fn open_create(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            level.popup_open = false;
            level.creating = true;
        }
    }

    pub fn close_create(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            level.creating = false;
        }
    }

    // =========================================================================
    // FIELDS AND FORMAT
    // =========================================================================

    /// Field set the next field edit builds on: the newest unconfirmed one
    /// sent for the current library, else the cached one.
    fn field_base(&self) -> Option<&[String]> {
        let current = self.current()?;
        match &self.unconfirmed_fields {
            Some((id, _, fields)) if *id == current.id => Some(fields.as_slice()),
            _ => Some(current.fields.as_slice()),
        }
    }

    /// Field set with `name` appended, or `None` if blank or already present.
    #[must_use]
    pub fn fields_with(&self, name: &str) -> Option<Vec<String>> {
        let name = name.trim();
        let mut fields = self.field_base()?.to_vec();
        if name.is_empty() || fields.iter().any(|f| f == name) {
            return None;
        }
        fields.push(name.to_owned());
        Some(fields)
    }

    /// Field set without `name`, or `None` if it is not defined.
    #[must_use]
    pub fn fields_without(&self, name: &str) -> Option<Vec<String>> {
        let fields = self.field_base()?;
        if !fields.iter().any(|f| f == name) {
            return None;
        }
        Some(fields.iter().filter(|f| *f != name).cloned().collect())
    }

    /// Patch for a new format value, or `None` when it is unchanged.
    #[must_use]
    pub fn format_patch(&self, format: &str) -> Option<LibraryPatch> {
        let current = self.current()?;
        if current.format.as_deref().unwrap_or_default() == format {
            return None;
        }
        Some(LibraryPatch::format(format.to_owned()))
    }

    /// Number `patch` for the current library. Returns `None` without a
    /// current library.
    pub fn begin_patch(&mut self, patch: LibraryPatch) -> Option<(LibraryId, u64, LibraryPatch)> {
        let id = self.current_id?;
        self.patch_seq += 1;
        if let Some(fields) = &patch.fields {
            self.unconfirmed_fields = Some((id, self.patch_seq, fields.clone()));
        }
        Some((id, self.patch_seq, patch))
    }

    /// Apply the echo of PATCH `seq`. Returns `false` for an echo older than
    /// one already applied to the same library, which is dropped.
    pub fn apply_patched(&mut self, seq: u64, row: LibraryRow) -> bool {
        self.confirm_patch(seq);
        let applied = self.applied_patch.entry(row.id).or_default();
        if seq < *applied {
            return false;
        }
        *applied = seq;
        self.apply_row(row);
        true
    }

    /// Record a failed PATCH `seq`.
    pub fn apply_patch_failure(&mut self, seq: u64, message: String) {
        self.confirm_patch(seq);
        self.apply_failure(None, message);
    }

    fn confirm_patch(&mut self, seq: u64) {
        if matches!(&self.unconfirmed_fields, Some((_, sent, _)) if *sent == seq) {
            self.unconfirmed_fields = None;
        }
    }

    /// Merge a `PATCH /library` echo into the cache.
    pub fn apply_row(&mut self, row: LibraryRow) {
        let id = row.id;
        match self.cache.get_mut(&id) {
            Some(spec) => spec.merge_row(row),
            None => {
                self.cache.insert(id, LibrarySpec::from_row(row));
            }
        }
        if self.current_id == Some(id) {
            self.reattach_pending();
        }
    }

    // =========================================================================
    // PENDING FILES
    // =========================================================================

    #[must_use]
    pub fn is_pending(&self, path: &str) -> bool {
        self.pending.iter().any(|e| e.path == path)
    }

    /// Input names of the pending entry for `path`, in field order.
    #[must_use]
    pub fn pending_field_names(&self, path: &str) -> Vec<String> {
        self.pending
            .iter()
            .find(|e| e.path == path)
            .map(|entry| entry.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn pending_value(&self, path: &str, field: &str) -> String {
        self.pending
            .iter()
            .find(|e| e.path == path)
            .and_then(|entry| entry.fields.iter().find(|f| f.name == field))
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    /// Add `path` with inputs for the current fields. Returns `false` if it
    /// is already pending.
    pub fn add_pending(&mut self, path: &str) -> bool {
        if self.is_pending(path) {
            return false;
        }
        let fields = self.current_fields();
        self.pending.push(PendingEntry::new(path, &fields));
        true
    }

    /// Remove the entry for `path`. Returns `false` if it was not pending.
    pub fn remove_pending(&mut self, path: &str) -> bool {
        match self.pending.iter().position(|e| e.path == path) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_pending_value(&mut self, path: &str, field: &str, value: String) -> bool {
        self.pending
            .iter_mut()
            .find(|e| e.path == path)
            .is_some_and(|entry| entry.set_value(field, value))
    }

    /// Re-attach every pending entry to the current field list.
    pub fn reattach_pending(&mut self) {
        let fields = self.current_fields();
        for entry in &mut self.pending {
            entry.attach_fields(&fields);
        }
    }

    /// True when there is something to link and the current library is
    /// settled (no listing or create in flight).
    #[must_use]
    pub fn can_link(&self) -> bool {
        self.current_id.is_some() && !self.loading && !self.pending.is_empty()
    }

    /// Drain the pending list into `PUT /record` bodies for the current
    /// library. Nothing is drained unless [`Self::can_link`] holds.
    pub fn take_link_batch(&mut self) -> Vec<NewRecord> {
        let Some(parent_id) = self.current_id.filter(|_| self.can_link()) else {
            return Vec::new();
        };
        self.pending
            .drain(..)
            .map(|entry| entry.to_record(parent_id))
            .collect()
    }
}
