use super::*;
use crate::net::types::ROOT_LIBRARY_ID;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn child(id: LibraryId, name: &str) -> LibrarySpec {
    LibrarySpec {
        id,
        name: Some(name.to_owned()),
        location: Some(format!("{name}/")),
        parent_id: Some(ROOT_LIBRARY_ID),
        ..LibrarySpec::default()
    }
}

fn root() -> LibrarySpec {
    LibrarySpec {
        id: ROOT_LIBRARY_ID,
        libraries: vec![child(1, "tv"), child(2, "movies")],
        ..LibrarySpec::default()
    }
}

fn tv_listing() -> LibrarySpec {
    LibrarySpec {
        fields: names(&["show", "season"]),
        format: Some("{show}/{season}".to_owned()),
        libraries: vec![LibrarySpec { id: 3, name: Some("Lost".to_owned()), ..LibrarySpec::default() }],
        ..child(1, "tv")
    }
}

/// State after loading the root and choosing `tv` at level 0.
fn loaded() -> LibraryState {
    let mut state = LibraryState::default();
    let seq = state.begin_listing();
    state.apply_listing(seq, root());
    let seq = state.select_child(0, 1, "tv").unwrap();
    state.apply_listing(seq, tv_listing());
    state
}

/// `loaded()` plus `Lost` (fields `ep`) chosen at level 1.
fn loaded_lost() -> LibraryState {
    let mut state = loaded();
    let seq = state.select_child(1, 3, "Lost").unwrap();
    state.apply_listing(seq, LibrarySpec { id: 3, fields: names(&["ep"]), ..LibrarySpec::default() });
    state
}

// =============================================================
// Defaults and listing
// =============================================================

#[test]
fn library_state_default_empty() {
    let state = LibraryState::default();
    assert!(state.current().is_none());
    assert!(state.levels.is_empty());
    assert!(state.pending.is_empty());
    assert!(state.current_fields().is_empty());
    assert!(!state.loading);
}

#[test]
fn apply_listing_pushes_level_with_children() {
    let mut state = LibraryState::default();
    let seq = state.begin_listing();
    assert!(state.loading);
    assert!(state.apply_listing(seq, root()));

    assert!(!state.loading);
    assert_eq!(state.current_id, Some(ROOT_LIBRARY_ID));
    assert_eq!(state.levels.len(), 1);
    assert_eq!(state.levels[0].label, UNSELECTED_LABEL);
    assert_eq!(
        state.levels[0].targets,
        vec![
            LibraryTarget { id: 1, name: "tv".to_owned() },
            LibraryTarget { id: 2, name: "movies".to_owned() },
        ]
    );
}

#[test]
fn stale_listing_only_refreshes_cache() {
    let mut state = LibraryState::default();
    let first = state.begin_listing();
    let second = state.begin_listing();

    assert!(!state.apply_listing(first, tv_listing()));
    assert!(state.levels.is_empty());
    assert!(state.current_id.is_none());
    assert!(state.cache.contains_key(&1));
    assert!(state.loading);

    assert!(state.apply_listing(second, root()));
    assert_eq!(state.current_id, Some(ROOT_LIBRARY_ID));
}

#[test]
fn apply_failure_surfaces_message() {
    let mut state = LibraryState::default();
    let seq = state.begin_listing();
    state.apply_failure(Some(seq), "library listing failed: 404".to_owned());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("library listing failed: 404"));
}

#[test]
fn failed_listing_falls_back_to_last_level() {
    let mut state = loaded_lost();
    state.add_pending("/lake/a.mkv");

    let seq = state.select_child(0, 2, "movies").unwrap();
    state.apply_failure(Some(seq), "library listing failed: 500".to_owned());

    assert!(!state.loading);
    assert_eq!(state.levels.len(), 1);
    assert_eq!(state.levels[0].label, UNSELECTED_LABEL);
    assert_eq!(state.current_id, Some(ROOT_LIBRARY_ID));
    assert_eq!(state.pending_field_names("/lake/a.mkv"), state.current_fields());

    let batch = state.take_link_batch();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].parent_id, ROOT_LIBRARY_ID);
}

#[test]
fn stale_or_unsequenced_failure_keeps_breadcrumb() {
    let mut state = loaded();
    let stale = state.begin_listing();
    let seq = state.select_child(0, 2, "movies").unwrap();

    state.apply_failure(Some(stale), "old".to_owned());
    state.apply_failure(None, "record link failed: 500".to_owned());

    assert!(state.loading);
    assert_eq!(state.levels[0].label, "movies");
    assert!(state.apply_listing(seq, child(2, "movies")));
    assert_eq!(state.current_id, Some(2));
}

// =============================================================
// Breadcrumb selection
// =============================================================

#[test]
fn select_child_labels_level_and_pushes_listing() {
    let state = loaded();
    assert_eq!(state.levels.len(), 2);
    assert_eq!(state.levels[0].label, "tv");
    assert_eq!(state.levels[1].source_id, 1);
    assert_eq!(state.current_id, Some(1));
    assert_eq!(state.current_fields(), names(&["show", "season"]));
}

#[test]
fn select_child_truncates_deeper_levels() {
    let mut state = loaded();
    let seq = state.select_child(1, 3, "Lost").unwrap();
    state.apply_listing(seq, LibrarySpec { id: 3, ..LibrarySpec::default() });
    assert_eq!(state.levels.len(), 3);

    let seq = state.select_child(0, 2, "movies").unwrap();
    assert_eq!(state.levels.len(), 1);
    assert_eq!(state.levels[0].label, "movies");

    state.apply_listing(seq, child(2, "movies"));
    assert_eq!(state.levels.len(), 2);
    assert_eq!(state.levels[1].source_id, 2);
    assert_eq!(state.current_id, Some(2));
}

#[test]
fn select_child_rejects_unknown_target_or_level() {
    let mut state = loaded();
    assert!(state.select_child(0, 99, "nope").is_none());
    assert!(state.select_child(7, 1, "tv").is_none());
    assert_eq!(state.levels.len(), 2);
}

#[test]
fn select_child_closes_popup_and_create_form() {
    let mut state = loaded();
    state.toggle_popup(0);
    assert!(state.levels[0].popup_open);
    state.select_child(0, 2, "movies");
    assert!(!state.levels[0].popup_open);
    assert!(!state.levels[0].creating);
}

// =============================================================
// Popup and create form
// =============================================================

#[test]
fn open_create_hides_popup() {
    let mut state = loaded();
    state.toggle_popup(1);
    state.open_create(1);
    assert!(!state.levels[1].popup_open);
    assert!(state.levels[1].creating);
    state.close_create(1);
    assert!(!state.levels[1].creating);
}

#[test]
fn toggle_popup_flips_and_close_popup_resets() {
    let mut state = loaded();
    state.toggle_popup(0);
    state.toggle_popup(0);
    assert!(!state.levels[0].popup_open);
    state.toggle_popup(0);
    state.close_popup(0);
    assert!(!state.levels[0].popup_open);
}

// =============================================================
// Creating libraries
// =============================================================

#[test]
fn create_child_inherits_fields_format_and_location() {
    let mut state = loaded();
    let (_, body) = state.create_child(1, " Fringe ").unwrap();
    assert_eq!(
        body,
        NewLibrary {
            location: "tv/Fringe/".to_owned(),
            name: "Fringe".to_owned(),
            parent_id: 1,
            fields: names(&["show", "season"]),
            format: Some("{show}/{season}".to_owned()),
        }
    );
    assert_eq!(state.levels[1].label, "Fringe");
    assert_eq!(state.current_id, Some(1));
}

#[test]
fn create_child_under_root_without_location() {
    let mut state = LibraryState::default();
    let seq = state.begin_listing();
    state.apply_listing(seq, root());
    let (_, body) = state.create_child(0, "music").unwrap();
    assert_eq!(body.location, "music/");
    assert_eq!(body.parent_id, ROOT_LIBRARY_ID);
}

#[test]
fn create_child_ignores_blank_name() {
    let mut state = loaded();
    let before = state.listing_seq;
    assert!(state.create_child(1, "   ").is_none());
    assert_eq!(state.listing_seq, before);
    assert_eq!(state.levels.len(), 2);
}

#[test]
fn create_child_truncates_deeper_levels() {
    let mut state = loaded();
    assert!(state.create_child(0, "docs").is_some());
    assert_eq!(state.levels.len(), 1);
    assert_eq!(state.current_id, Some(ROOT_LIBRARY_ID));
}

#[test]
fn create_child_reattaches_pending_to_source_fields() {
    let mut state = loaded_lost();
    state.add_pending("/lake/a.mkv");

    let (seq, _) = state.create_child(1, "Fringe").unwrap();
    assert_eq!(state.pending_field_names("/lake/a.mkv"), names(&["show", "season"]));

    state.apply_failure(Some(seq), "library create failed: 500".to_owned());
    assert_eq!(state.current_id, Some(1));
    assert_eq!(state.levels[1].label, UNSELECTED_LABEL);
    assert_eq!(state.pending_field_names("/lake/a.mkv"), state.current_fields());

    let batch = state.take_link_batch();
    assert_eq!(batch[0].parent_id, 1);
    let keys: Vec<&str> = batch[0].attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["season", "show"]);
}

#[test]
fn apply_created_appends_target_and_pushes_level() {
    let mut state = loaded();
    let (seq, body) = state.create_child(1, "Fringe").unwrap();
    let row = LibraryRow {
        id: 10,
        name: Some(body.name.clone()),
        location: Some(body.location.clone()),
        parent_id: Some(body.parent_id),
        fields: body.fields.clone(),
        format: body.format.clone(),
    };

    assert!(state.apply_created(seq, 1, row));

    assert_eq!(state.current_id, Some(10));
    assert_eq!(state.levels.len(), 3);
    assert_eq!(state.levels[2].source_id, 10);
    assert!(state.levels[2].targets.is_empty());
    assert!(state.levels[1].targets.contains(&LibraryTarget { id: 10, name: "Fringe".to_owned() }));
    assert!(state.cache[&1].libraries.iter().any(|l| l.id == 10));
    assert!(state.current().unwrap().records.is_empty());
}

#[test]
fn stale_create_is_cached_but_does_not_move_breadcrumb() {
    let mut state = loaded();
    let (seq, _) = state.create_child(1, "Fringe").unwrap();
    state.select_child(0, 2, "movies");

    let row = LibraryRow { id: 10, name: Some("Fringe".to_owned()), parent_id: Some(1), ..LibraryRow::default() };
    assert!(!state.apply_created(seq, 1, row));
    assert!(state.cache.contains_key(&10));
    assert!(state.cache[&1].libraries.iter().any(|l| l.id == 10));
    assert_eq!(state.levels.len(), 1);
}

// =============================================================
// Field editing
// =============================================================

#[test]
fn fields_with_appends_unique_trimmed_name() {
    let state = loaded();
    assert_eq!(state.fields_with(" episode "), Some(names(&["show", "season", "episode"])));
    assert_eq!(state.fields_with("show"), None);
    assert_eq!(state.fields_with("  "), None);
}

#[test]
fn fields_without_removes_name() {
    let state = loaded();
    assert_eq!(state.fields_without("show"), Some(names(&["season"])));
    assert_eq!(state.fields_without("missing"), None);
}

#[test]
fn field_edits_need_a_current_library() {
    let state = LibraryState::default();
    assert_eq!(state.fields_with("a"), None);
    assert_eq!(state.fields_without("a"), None);
    assert!(state.format_patch("{a}").is_none());
}

#[test]
fn apply_row_merges_and_reattaches_pending_inputs() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    state.add_pending("/lake/b.mkv");
    state.set_pending_value("/lake/a.mkv", "show", "Lost".to_owned());

    state.apply_row(LibraryRow {
        id: 1,
        name: Some("tv".to_owned()),
        location: Some("tv/".to_owned()),
        parent_id: Some(0),
        fields: names(&["show", "episode"]),
        format: Some("{show}".to_owned()),
    });

    assert_eq!(state.current_fields(), names(&["show", "episode"]));
    assert_eq!(state.current().unwrap().libraries.len(), 1);
    for entry in &state.pending {
        let inputs: Vec<&str> = entry.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(inputs, vec!["show", "episode"]);
    }
    assert_eq!(state.pending[0].fields[0].value, "Lost");
}

#[test]
fn apply_row_for_other_library_leaves_pending_alone() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    state.apply_row(LibraryRow { id: 2, fields: names(&["title"]), ..LibraryRow::default() });
    assert_eq!(state.cache[&2].fields, names(&["title"]));
    assert_eq!(state.pending[0].fields.len(), 2);
}

#[test]
fn quick_field_edits_build_on_newest_sent_set() {
    let mut state = loaded();
    let first = state.fields_with("episode").unwrap();
    let (id, first_seq, _) = state.begin_patch(LibraryPatch::fields(first.clone())).unwrap();
    assert_eq!(id, 1);

    let second = state.fields_without("season").unwrap();
    assert_eq!(second, names(&["show", "episode"]));
    let (_, second_seq, _) = state.begin_patch(LibraryPatch::fields(second.clone())).unwrap();

    assert!(state.apply_patched(first_seq, LibraryRow { id: 1, fields: first, ..LibraryRow::default() }));
    assert_eq!(state.fields_with("year"), Some(names(&["show", "episode", "year"])));

    assert!(state.apply_patched(second_seq, LibraryRow { id: 1, fields: second.clone(), ..LibraryRow::default() }));
    assert!(state.unconfirmed_fields.is_none());
    assert_eq!(state.current_fields(), second);
}

#[test]
fn older_patch_echo_is_dropped() {
    let mut state = loaded();
    let (_, first_seq, _) = state.begin_patch(LibraryPatch::fields(names(&["a"]))).unwrap();
    let (_, second_seq, _) = state.begin_patch(LibraryPatch::fields(names(&["a", "b"]))).unwrap();

    assert!(state.apply_patched(second_seq, LibraryRow { id: 1, fields: names(&["a", "b"]), ..LibraryRow::default() }));
    assert!(!state.apply_patched(first_seq, LibraryRow { id: 1, fields: names(&["a"]), ..LibraryRow::default() }));
    assert_eq!(state.current_fields(), names(&["a", "b"]));
}

#[test]
fn failed_field_patch_falls_back_to_cached_set() {
    let mut state = loaded();
    let fields = state.fields_with("episode").unwrap();
    let (_, seq, _) = state.begin_patch(LibraryPatch::fields(fields)).unwrap();

    state.apply_patch_failure(seq, "library update failed: 500".to_owned());

    assert!(state.unconfirmed_fields.is_none());
    assert_eq!(state.error.as_deref(), Some("library update failed: 500"));
    assert_eq!(state.fields_with("year"), Some(names(&["show", "season", "year"])));
}

#[test]
fn begin_patch_needs_a_current_library() {
    let mut state = LibraryState::default();
    assert!(state.begin_patch(LibraryPatch::format("{a}".to_owned())).is_none());
    assert_eq!(state.patch_seq, 0);
}

#[test]
fn format_patch_skips_unchanged_value() {
    let state = loaded();
    assert!(state.format_patch("{show}/{season}").is_none());
    assert_eq!(
        state.format_patch("{show}/S{season}"),
        Some(LibraryPatch::format("{show}/S{season}".to_owned()))
    );
    assert_eq!(state.current_format(), "{show}/{season}");
}

// =============================================================
// Pending files and linking
// =============================================================

#[test]
fn add_pending_attaches_current_fields_once() {
    let mut state = loaded();
    assert!(state.add_pending("/lake/a.mkv"));
    assert!(!state.add_pending("/lake/a.mkv"));
    assert_eq!(state.pending.len(), 1);
    assert_eq!(state.pending[0].fields.len(), 2);
}

#[test]
fn remove_pending_removes_exact_entry() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    state.add_pending("/lake/b.mkv");
    state.add_pending("/lake/c.mkv");

    assert!(state.remove_pending("/lake/a.mkv"));
    let paths: Vec<&str> = state.pending.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/lake/b.mkv", "/lake/c.mkv"]);
    assert!(!state.remove_pending("/lake/a.mkv"));
}

#[test]
fn pending_lookups_follow_entry_inputs() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    state.set_pending_value("/lake/a.mkv", "season", "4".to_owned());
    assert_eq!(state.pending_field_names("/lake/a.mkv"), names(&["show", "season"]));
    assert_eq!(state.pending_value("/lake/a.mkv", "season"), "4");
    assert_eq!(state.pending_value("/lake/a.mkv", "missing"), "");
    assert!(state.pending_field_names("/lake/zzz.mkv").is_empty());
}

#[test]
fn new_listing_reattaches_pending_to_new_fields() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    let seq = state.select_child(0, 2, "movies").unwrap();
    state.apply_listing(seq, LibrarySpec { fields: names(&["title"]), ..child(2, "movies") });
    assert_eq!(state.pending[0].fields.len(), 1);
    assert_eq!(state.pending[0].fields[0].name, "title");
}

#[test]
fn take_link_batch_drains_all_entries() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    state.add_pending("/lake/b.mkv");
    state.set_pending_value("/lake/b.mkv", "season", "3".to_owned());

    let batch = state.take_link_batch();

    assert!(state.pending.is_empty());
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().all(|r| r.parent_id == 1));
    assert_eq!(batch[1].referrent, "/lake/b.mkv");
    assert_eq!(batch[1].attributes.get("season").map(String::as_str), Some("3"));
}

#[test]
fn take_link_batch_without_library_is_noop() {
    let mut state = LibraryState::default();
    state.add_pending("/lake/a.mkv");
    assert!(state.take_link_batch().is_empty());
    assert_eq!(state.pending.len(), 1);
}

#[test]
fn link_waits_for_in_flight_listing() {
    let mut state = loaded();
    state.add_pending("/lake/a.mkv");
    assert!(state.can_link());

    state.select_child(0, 2, "movies");

    assert!(!state.can_link());
    assert!(state.take_link_batch().is_empty());
    assert_eq!(state.pending.len(), 1);
}
