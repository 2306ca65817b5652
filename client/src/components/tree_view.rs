//! Left pane: the unlinked file tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! `LakeView` fetches `GET /tree` once and renders it through recursive
//! `TreeDir` nodes. Clicking a `TreeFile` moves it into the library panel's
//! pending list; the file stays mounted and is hidden by class.

use leptos::prelude::*;

use crate::net::types::TreeNode;
use crate::state::lake::LakeState;
use crate::state::library::LibraryState;
use crate::util::library_actions;

/// Tree pane root. Requests the listing on mount.
#[component]
pub fn LakeView() -> impl IntoView {
    let lake = expect_context::<RwSignal<LakeState>>();

    Effect::new(move || library_actions::load_tree(lake));

    // Only a new listing rebuilds the tree; visibility changes are per-file.
    let tree = Memo::new(move |_| lake.with(|l| l.tree.clone()));
    let status = move || {
        lake.with(|l| {
            if l.loading {
                Some("Loading tree...".to_owned())
            } else {
                l.error.clone()
            }
        })
    };

    view! {
        <div class="tree-main">
            {move || status().map(|message| view! { <p class="tree-status">{message}</p> })}
            {move || tree.get().map(|root| view! { <TreeDir node=root prefix=String::new()/> })}
        </div>
    }
}

/// A collapsible directory. Starts collapsed.
#[component]
pub fn TreeDir(node: TreeNode, prefix: String) -> impl IntoView {
    let collapsed = RwSignal::new(true);
    let child_prefix = node.child_prefix(&prefix);

    let dirs = node
        .dirs
        .into_iter()
        .map(|dir| view! { <TreeDir node=dir prefix=child_prefix.clone()/> }.into_any())
        .collect_view();
    let files = node
        .files
        .into_iter()
        .map(|name| {
            let path = format!("{child_prefix}{name}");
            view! { <TreeFile name=name path=path/> }
        })
        .collect_view();

    view! {
        <div class="tree-dir" class:collapsed=move || collapsed.get()>
            <span class="tree-dir-label" on:click=move |_| collapsed.update(|c| *c = !*c)>
                {node.name}
            </span>
            {dirs}
            {files}
        </div>
    }
}

/// A file label. Hidden while the file is pending.
#[component]
pub fn TreeFile(name: String, path: String) -> impl IntoView {
    let lake = expect_context::<RwSignal<LakeState>>();
    let library = expect_context::<RwSignal<LibraryState>>();

    let hidden_path = path.clone();
    let click_path = path.clone();

    view! {
        <span
            class="tree-file-label"
            class:hidden=move || lake.with(|l| l.is_hidden(&hidden_path))
            data-fullpath=path
            on:click=move |_| library_actions::select_file(lake, library, &click_path)
        >
            {name}
        </span>
    }
}
