//! Breadcrumb selector that walks down the library hierarchy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each level lists the children of one library. Choosing a child loads its
//! spec and appends a level for it; creating a child does the same with the
//! echoed row. Levels to the right of a changed level are dropped first.

use leptos::prelude::*;

use crate::state::library::{LibraryState, SelectorLevel};
use crate::util::library_actions;

/// Row of selector levels from the root library down to the current one.
#[component]
pub fn LibrarySelector() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let level_count = Memo::new(move |_| library.with(|s| s.levels.len()));

    view! {
        <div class="library-selector">
            <For
                each=move || 0..level_count.get()
                key=|index| *index
                children=move |index| view! { <SelectorLevelView index=index/> }
            />
        </div>
    }
}

/// One breadcrumb segment: its label (or create form) and the child popup.
#[component]
fn SelectorLevelView(index: usize) -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let level = Memo::new(move |_| library.with(|s| s.levels.get(index).cloned()));
    let draft = RwSignal::new(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let creating = move || level.with(|l| l.as_ref().is_some_and(|l| l.creating));
    let popup_open = move || level.with(|l| l.as_ref().is_some_and(|l| l.popup_open));

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if creating() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = draft.get_untracked();
        draft.set(String::new());
        library_actions::create_child(library, index, name);
    };

    view! {
        <div class="library-selector-level">
            <Show
                when=creating
                fallback=move || {
                    let label = move || level.with(|l| l.as_ref().map(|l| l.label.clone()).unwrap_or_default());
                    view! {
                        <span
                            class="library-selector-level-label"
                            on:click=move |_| library.update(|s| s.toggle_popup(index))
                        >
                            {label}
                        </span>
                    }
                }
            >
                <form
                    class="library-selector-level-form"
                    on:submit=on_submit
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                >
                    <input
                        class="library-selector-level-input"
                        type="text"
                        node_ref=input_ref
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        on:blur=move |_| library.update(|s| s.close_create(index))
                    />
                </form>
            </Show>
            <Show when=popup_open>
                <div class="library-selector-backdrop" on:click=move |_| library.update(|s| s.close_popup(index))></div>
                <SelectorPopup index=index level=level/>
            </Show>
        </div>
    }
}

/// Child entries of a level plus the "+" entry that opens the create form.
#[component]
fn SelectorPopup(index: usize, level: Memo<Option<SelectorLevel>>) -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let targets = move || level.with(|l| l.as_ref().map(|l| l.targets.clone()).unwrap_or_default());

    view! {
        <div class="library-selector-level-popup">
            <For
                each=targets
                key=|target| target.id
                children=move |target| {
                    let (id, name) = (target.id, target.name.clone());
                    view! {
                        <div
                            class="library-selector-level-popup-entry"
                            on:click=move |_| library_actions::select_child(library, index, id, name.clone())
                        >
                            {target.name}
                        </div>
                    }
                }
            />
            <div
                class="library-selector-level-popup-entry library-selector-level-popup-new"
                on:click=move |_| {
                    library.update(|s| s.open_create(index));
                }
            >
                "+"
            </div>
        </div>
    }
}
