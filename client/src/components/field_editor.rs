//! Field-name tags and the file-name format input for the current library.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every edit is persisted at once with `PATCH /library/:id`; the echoed row
//! replaces the cached library and re-attaches pending entry inputs.

use leptos::prelude::*;

use crate::state::library::LibraryState;
use crate::util::library_actions;

/// Removable field tags plus an inline "add field" form.
#[component]
pub fn FieldEditor() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let fields = Memo::new(move |_| library.with(LibraryState::current_fields));
    let adding = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if adding.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    view! {
        <div class="library-fields">
            <For
                each=move || fields.get()
                key=|field| field.clone()
                children=move |field| {
                    let remove = field.clone();
                    view! {
                        <span
                            class="library-field-edit"
                            title="Remove field"
                            on:click=move |_| library_actions::remove_field(library, &remove)
                        >
                            {field}
                        </span>
                    }
                }
            />
            <div class="library-field-edit-new">
                <Show
                    when=move || adding.get()
                    fallback=move || {
                        view! {
                            <div class="library-field-edit-label">
                                <span on:click=move |_| {
                                    draft.set(String::new());
                                    adding.set(true);
                                }>"+"</span>
                            </div>
                        }
                    }
                >
                    <form
                        class="library-field-edit-form"
                        on:submit=move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            library_actions::add_field(library, &draft.get_untracked());
                            adding.set(false);
                        }
                    >
                        <input
                            class="library-field-edit-input"
                            type="text"
                            node_ref=input_ref
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                            on:blur=move |_| adding.set(false)
                        />
                    </form>
                </Show>
            </div>
        </div>
    }
}

/// Input for the library's file-name format. Commits on blur; submitting
/// the form blurs the input.
#[component]
pub fn FormatEditor() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let format = Memo::new(move |_| library.with(LibraryState::current_format));
    let draft = RwSignal::new(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Reset the draft whenever the stored format changes.
    Effect::new(move || draft.set(format.get()));

    view! {
        <form
            class="library-format-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                #[cfg(feature = "hydrate")]
                {
                    if let Some(input) = input_ref.get_untracked() {
                        let _ = input.blur();
                    }
                }
            }
        >
            <input
                class="library-format-input"
                type="text"
                placeholder="{field}/{field}.ext"
                node_ref=input_ref
                disabled=move || library.with(|s| s.current_id.is_none())
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:blur=move |_| library_actions::set_format(library, &draft.get_untracked())
            />
        </form>
    }
}
