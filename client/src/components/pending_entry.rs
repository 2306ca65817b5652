//! A pending file with one input per library field.

use leptos::prelude::*;

use crate::state::lake::LakeState;
use crate::state::library::LibraryState;
use crate::util::library_actions;

/// Pending entry row. Clicking the path sends the file back to the tree.
#[component]
pub fn PendingEntry(path: String) -> impl IntoView {
    let lake = expect_context::<RwSignal<LakeState>>();
    let library = expect_context::<RwSignal<LibraryState>>();

    let names_path = path.clone();
    let field_names = Memo::new(move |_| library.with(|s| s.pending_field_names(&names_path)));
    let click_path = path.clone();
    let input_path = path.clone();

    view! {
        <div class="library-entry-wrap">
            <span
                class="library-entry-label"
                title="Return to tree"
                on:click=move |_| library_actions::unselect_file(lake, library, &click_path)
            >
                {path}
            </span>
            <div class="library-entry-fields-wrap">
                <For
                    each=move || field_names.get()
                    key=|name| name.clone()
                    children=move |name| view! { <PendingField path=input_path.clone() name=name/> }
                />
            </div>
        </div>
    }
}

/// One labelled metadata input.
#[component]
fn PendingField(path: String, name: String) -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();

    let value_path = path.clone();
    let value_name = name.clone();
    let label = format!("{name}: ");

    view! {
        <div class="library-entry-field">
            <span>{label}</span>
            <input
                type="text"
                prop:value=move || library.with(|s| s.pending_value(&value_path, &value_name))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    library.update(|s| {
                        s.set_pending_value(&path, &name, value);
                    });
                }
            />
        </div>
    }
}
