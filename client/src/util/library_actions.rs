//! Request orchestration for the tree and library panes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call these helpers instead of talking to `net::api` directly.
//! Each helper mutates state first (so the UI reacts immediately), then issues
//! the request on the browser task queue and folds the response back in.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged to the console and stored on the owning state so the
//! view can show them; nothing here panics.

use leptos::prelude::*;

use crate::net::types::{LibraryId, LibraryPatch, ROOT_LIBRARY_ID};
use crate::state::lake::LakeState;
use crate::state::library::LibraryState;
use crate::state::selection;

/// Fetch the file tree once and store it.
pub fn load_tree(lake: RwSignal<LakeState>) {
    lake.update(|l| l.loading = true);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_tree().await {
            Ok(tree) => lake.update(|l| l.apply_tree(tree)),
            Err(e) => {
                log::warn!("tree listing failed: {e}");
                lake.update(|l| l.apply_error(e));
            }
        }
    });
}

/// Load the root library as the first breadcrumb level.
pub fn load_root(library: RwSignal<LibraryState>) {
    if let Some(seq) = library.try_update(LibraryState::begin_listing) {
        fetch_listing(library, seq, ROOT_LIBRARY_ID);
    }
}

/// Choose child `target_id` at breadcrumb level `index` and list it.
pub fn select_child(library: RwSignal<LibraryState>, index: usize, target_id: LibraryId, name: String) {
    let seq = library
        .try_update(|s| s.select_child(index, target_id, &name))
        .flatten();
    if let Some(seq) = seq {
        fetch_listing(library, seq, target_id);
    }
}

fn fetch_listing(library: RwSignal<LibraryState>, seq: u64, id: LibraryId) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_library(id).await {
            Ok(spec) => library.update(|s| {
                if !s.apply_listing(seq, spec) {
                    log::debug!("dropped stale listing for library {id} (seq {seq})");
                }
            }),
            Err(e) => {
                log::warn!("library {id} listing failed: {e}");
                library.update(|s| s.apply_failure(Some(seq), e));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (library, seq, id);
    }
}

/// Create child `name` under the source library of level `index`.
pub fn create_child(library: RwSignal<LibraryState>, index: usize, name: String) {
    let Some((seq, body)) = library.try_update(|s| s.create_child(index, &name)).flatten() else {
        library.update(|s| s.close_create(index));
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::create_library(&body).await {
            Ok(row) => {
                log::info!("created library {} at {}", row.id, body.location);
                library.update(|s| {
                    s.apply_created(seq, index, row);
                });
            }
            Err(e) => {
                log::warn!("library create failed: {e}");
                library.update(|s| s.apply_failure(Some(seq), e));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (seq, body);
    }
}

/// Send `patch` for the current library and merge the echoed row.
fn modify_current(library: RwSignal<LibraryState>, patch: LibraryPatch) {
    let Some((id, seq, patch)) = library.try_update(|s| s.begin_patch(patch)).flatten() else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::patch_library(id, &patch).await {
            Ok(row) => library.update(|s| {
                if !s.apply_patched(seq, row) {
                    log::debug!("dropped stale update for library {id} (seq {seq})");
                }
            }),
            Err(e) => {
                log::warn!("library {id} update failed: {e}");
                library.update(|s| s.apply_patch_failure(seq, e));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, seq, patch);
    }
}

/// Add field `name` to the current library.
pub fn add_field(library: RwSignal<LibraryState>, name: &str) {
    if let Some(fields) = library.with_untracked(|s| s.fields_with(name)) {
        modify_current(library, LibraryPatch::fields(fields));
    }
}

/// Remove field `name` from the current library.
pub fn remove_field(library: RwSignal<LibraryState>, name: &str) {
    if let Some(fields) = library.with_untracked(|s| s.fields_without(name)) {
        modify_current(library, LibraryPatch::fields(fields));
    }
}

/// Replace the current library's file-name format.
pub fn set_format(library: RwSignal<LibraryState>, format: &str) {
    if let Some(patch) = library.with_untracked(|s| s.format_patch(format)) {
        modify_current(library, patch);
    }
}

/// Link every pending file into the current library. The list is cleared
/// immediately; responses are not awaited before the UI moves on.
pub fn link_pending(library: RwSignal<LibraryState>) {
    let batch = library.try_update(LibraryState::take_link_batch).unwrap_or_default();
    #[cfg(feature = "hydrate")]
    for record in batch {
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::put_record(&record).await {
                log::warn!("linking {} failed: {e}", record.referrent);
                library.update(|s| s.apply_failure(None, format!("{}: {e}", record.referrent)));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = batch;
    }
}

/// Move `path` from the tree into the pending list.
pub fn select_file(lake: RwSignal<LakeState>, library: RwSignal<LibraryState>, path: &str) {
    lake.update(|l| {
        library.update(|lib| {
            selection::select_file(l, lib, path);
        });
    });
}

/// Move `path` from the pending list back into the tree.
pub fn unselect_file(lake: RwSignal<LakeState>, library: RwSignal<LibraryState>, path: &str) {
    lake.update(|l| {
        library.update(|lib| {
            selection::unselect_file(l, lib, path);
        });
    });
}
