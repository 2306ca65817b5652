//! Two-pane linking screen: lake tree on the left, library on the right.

use leptos::prelude::*;

use crate::components::library_view::LibraryView;
use crate::components::tree_view::LakeView;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div id="main">
            <LakeView/>
            <LibraryView/>
        </div>
    }
}
