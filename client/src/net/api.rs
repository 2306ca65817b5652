//! REST API helpers for the tree and library endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so a failed listing or edit
//! degrades to an error banner without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LibraryId, LibraryPatch, LibraryRow, LibrarySpec, NewLibrary, NewRecord, RecordSpec, TreeNode};

#[cfg(any(test, feature = "hydrate"))]
const TREE_ENDPOINT: &str = "/tree";
#[cfg(any(test, feature = "hydrate"))]
const LIBRARY_ENDPOINT: &str = "/library";
#[cfg(any(test, feature = "hydrate"))]
const RECORD_ENDPOINT: &str = "/record";

#[cfg(any(test, feature = "hydrate"))]
fn list_library_endpoint(id: LibraryId) -> String {
    format!("/list_library/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn library_endpoint(id: LibraryId) -> String {
    format!("{LIBRARY_ENDPOINT}/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(op: &str, status: u16) -> String {
    format!("{op} failed: {status}")
}

/// Fetch the unlinked file tree from `GET /tree`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn fetch_tree() -> Result<TreeNode, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(TREE_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("tree listing", resp.status()));
        }
        resp.json::<TreeNode>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch one library with its direct children from `GET /list_library/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn fetch_library(id: LibraryId) -> Result<LibrarySpec, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = list_library_endpoint(id);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("library listing", resp.status()));
        }
        resp.json::<LibrarySpec>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

/// Create a child library via `PUT /library`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn create_library(body: &NewLibrary) -> Result<LibraryRow, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(LIBRARY_ENDPOINT)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("library create", resp.status()));
        }
        resp.json::<LibraryRow>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err("not available on server".to_owned())
    }
}

/// Update library columns via `PATCH /library/{id}` and return the echoed row.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn patch_library(id: LibraryId, patch: &LibraryPatch) -> Result<LibraryRow, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = library_endpoint(id);
        let resp = gloo_net::http::Request::patch(&url)
            .json(patch)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("library update", resp.status()));
        }
        resp.json::<LibraryRow>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, patch);
        Err("not available on server".to_owned())
    }
}

/// Link one file into a library via `PUT /record`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn put_record(body: &NewRecord) -> Result<RecordSpec, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(RECORD_ENDPOINT)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("record link", resp.status()));
        }
        resp.json::<RecordSpec>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err("not available on server".to_owned())
    }
}
