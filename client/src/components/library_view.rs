//! Right pane: library selector, field and format editors, and the pending
//! file list with its link action.

use leptos::prelude::*;

use crate::components::field_editor::{FieldEditor, FormatEditor};
use crate::components::library_selector::LibrarySelector;
use crate::components::pending_entry::PendingEntry;
use crate::state::library::LibraryState;
use crate::util::library_actions;

/// Library pane root. Loads the root library on mount.
#[component]
pub fn LibraryView() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();

    Effect::new(move || library_actions::load_root(library));

    let error = move || library.with(|s| s.error.clone());
    let pending_paths = move || library.with(|s| s.pending.iter().map(|e| e.path.clone()).collect::<Vec<_>>());
    let link_disabled = move || library.with(|s| !s.can_link());

    view! {
        <div class="library-main">
            {move || {
                error()
                    .map(|message| {
                        view! {
                            <div class="library-error">
                                <span>{message}</span>
                                <button
                                    class="library-error-dismiss"
                                    on:click=move |_| library.update(|s| s.error = None)
                                >
                                    "x"
                                </button>
                            </div>
                        }
                    })
            }}
            <Show when=move || library.with(|s| s.loading)>
                <p class="library-status">"Loading..."</p>
            </Show>
            <LibrarySelector/>
            <FieldEditor/>
            <FormatEditor/>
            <div class="library-entries">
                <For
                    each=pending_paths
                    key=|path| path.clone()
                    children=|path| view! { <PendingEntry path=path/> }
                />
            </div>
            <button
                class="library-link"
                disabled=link_disabled
                on:click=move |_| library_actions::link_pending(library)
            >
                "Link"
            </button>
        </div>
    }
}
