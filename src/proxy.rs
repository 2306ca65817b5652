//! Forwarding of library API calls to the upstream service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to this host only. Every library endpoint is relayed
//! unchanged (method, path, query, JSON body) to `HARDLINKER_API_URL`, and
//! the upstream status and body are returned as-is.
//!
//! ERROR HANDLING
//! ==============
//! Upstream transport failures become `502 Bad Gateway` with a plain-text
//! reason. Upstream error statuses are not errors here; they pass through.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream request could not be sent or timed out.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream response body could not be read.
    #[error("upstream body read failed: {0}")]
    Body(String),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Join the upstream base URL with the request path and query.
#[must_use]
pub fn upstream_url(base: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{}{path_and_query}", base.trim_end_matches('/'))
}

/// Relay one request to the library API.
///
/// # Errors
///
/// Returns [`ProxyError`] if the upstream cannot be reached or its body
/// cannot be read.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.upstream, &uri);
    tracing::debug!(%method, %url, "forwarding library request");

    let mut request = state.http.request(method.clone(), &url);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        request = request.header(header::CONTENT_TYPE, content_type.clone());
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::warn!(%method, %url, error = %e, "upstream request failed");
        ProxyError::Upstream(e.to_string())
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    if !status.is_success() {
        tracing::info!(%method, %url, %status, "upstream returned error status");
    }

    let mut response = (status, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
