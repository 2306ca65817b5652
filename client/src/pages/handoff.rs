//! Auth handoff page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Served behind the auth proxy, which injects the login response and the
//! redirect target as window globals. On mount the page stores the player's
//! session entries and replaces itself with the redirect target. It renders
//! nothing useful unless something goes wrong.

#[cfg(test)]
#[path = "handoff_test.rs"]
mod handoff_test;

use leptos::prelude::*;

use crate::util::{handoff, storage};

/// Read the globals, persist the session, and redirect.
///
/// # Errors
///
/// Returns an error string describing the first step that failed.
pub fn run_handoff() -> Result<(), String> {
    let (body, redirect, server) = handoff::read_globals()?;
    let entries = handoff::storage_entries(&body, &server)?;
    storage::set_items(&entries)?;
    handoff::redirect(&redirect);
    Ok(())
}

#[component]
pub fn AuthHandoffPage() -> impl IntoView {
    let failure = RwSignal::new(None::<String>);

    Effect::new(move || {
        if let Err(e) = run_handoff() {
            #[cfg(feature = "hydrate")]
            log::error!("auth handoff failed: {e}");
            failure.set(Some(e));
        }
    });

    view! {
        <div class="handoff-page">
            {move || failure.get().map(|message| view! { <p class="handoff-error">{message}</p> })}
        </div>
    }
}
