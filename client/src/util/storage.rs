//! Browser `localStorage` helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only storage access so pages never repeat web-sys glue.
//! Outside the browser every write fails with a fixed message.

/// Write every `(key, value)` pair to `localStorage`, stopping at the first failure.
///
/// # Errors
///
/// Returns an error string if storage is unavailable or a write is rejected.
pub fn set_items(entries: &[(String, String)]) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_owned())?;
        for (key, value) in entries {
            storage
                .set_item(key, value)
                .map_err(|_| format!("localStorage rejected {key}"))?;
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = entries;
        Err("not available on server".to_owned())
    }
}
