//! Token handoff from the media-server auth proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The proxy logs in on the user's behalf and serves a page exposing the
//! login response (`authproxy_response`, whose `body` is a JSON string) and a
//! redirect target (`authproxy_rd`). The web player reads its session from
//! `localStorage`, so the handoff writes the entries it expects and leaves.

#[cfg(test)]
#[path = "handoff_test.rs"]
mod handoff_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server address written into the stored credentials unless overridden.
pub const DEFAULT_SERVER_ADDRESS: &str = "http://jellyfin.antonpaqu.in";

/// Connection mode the player uses for manually entered addresses.
const MANUAL_CONNECTION_MODE: u8 = 2;

/// Name of the global holding the login response object.
pub const RESPONSE_GLOBAL: &str = "authproxy_response";
/// Name of the global holding the redirect URL.
pub const REDIRECT_GLOBAL: &str = "authproxy_rd";
/// Name of the optional global overriding [`DEFAULT_SERVER_ADDRESS`].
pub const SERVER_GLOBAL: &str = "authproxy_server";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthResponse {
    session_info: SessionInfo,
    server_id: String,
    access_token: String,
    user: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionInfo {
    device_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Credentials {
    servers: Vec<ServerCredential>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ServerCredential {
    date_last_accessed: u64,
    last_connection_mode: u8,
    manual_address: String,
    #[serde(rename = "manualAddressOnly")]
    manual_address_only: bool,
    name: String,
    id: String,
    local_address: String,
    access_token: String,
    user_id: String,
}

/// Build the `localStorage` entries for a login response `body`.
///
/// # Errors
///
/// Returns an error string if the body is not valid JSON, lacks a required
/// member, or the user object has no string `Id`.
pub fn storage_entries(body: &str, server_address: &str) -> Result<Vec<(String, String)>, String> {
    let data: AuthResponse = serde_json::from_str(body).map_err(|e| format!("invalid login response: {e}"))?;
    let user_id = data
        .user
        .get("Id")
        .and_then(Value::as_str)
        .ok_or_else(|| "invalid login response: User.Id missing".to_owned())?
        .to_owned();

    let credentials = Credentials {
        servers: vec![ServerCredential {
            date_last_accessed: 0,
            last_connection_mode: MANUAL_CONNECTION_MODE,
            manual_address: server_address.to_owned(),
            manual_address_only: true,
            name: String::new(),
            id: data.server_id.clone(),
            local_address: String::new(),
            access_token: data.access_token,
            user_id: user_id.clone(),
        }],
    };
    let credentials = serde_json::to_string(&credentials).map_err(|e| e.to_string())?;
    // `preserve_order` keeps the user object's keys as the proxy sent them.
    let user = serde_json::to_string(&data.user).map_err(|e| e.to_string())?;

    Ok(vec![
        ("_deviceId2".to_owned(), data.session_info.device_id),
        ("enableAutoLogin".to_owned(), "true".to_owned()),
        ("jellyfin_credentials".to_owned(), credentials),
        (format!("user-{user_id}-{}", data.server_id), user),
    ])
}

/// Read the handoff globals and return `(body, redirect, server_address)`.
///
/// # Errors
///
/// Returns an error string if either required global is missing or not a string.
pub fn read_globals() -> Result<(String, String, String), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsValue;

        let window: JsValue = web_sys::window().ok_or_else(|| "window unavailable".to_owned())?.into();
        let get = |target: &JsValue, key: &str| js_sys::Reflect::get(target, &JsValue::from_str(key)).ok();

        let response = get(&window, RESPONSE_GLOBAL)
            .filter(|v| !v.is_undefined() && !v.is_null())
            .ok_or_else(|| format!("{RESPONSE_GLOBAL} missing"))?;
        let body = get(&response, "body")
            .and_then(|v| v.as_string())
            .ok_or_else(|| format!("{RESPONSE_GLOBAL}.body missing"))?;
        let redirect = get(&window, REDIRECT_GLOBAL)
            .and_then(|v| v.as_string())
            .ok_or_else(|| format!("{REDIRECT_GLOBAL} missing"))?;
        let server = get(&window, SERVER_GLOBAL)
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_owned());
        Ok((body, redirect, server))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Replace the current history entry with `url`.
pub fn redirect(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().replace(url);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
