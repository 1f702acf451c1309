//! sw_fetch tool implementation.
//!
//! Routes one request through the offline cache the way a page's fetch
//! would be intercepted.

use std::collections::BTreeMap;

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shellcache_client::{FetchOutcome, Network, Router, canonicalize};
use shellcache_core::{Destination, Error, Request, RequestMode, Response, ResponseSource};

use super::json_result;

/// Input parameters for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchParams {
    /// The URL to request. Paths like `/about.html` resolve against the app scope.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Request mode: "navigate", "same-origin", "no-cors" or "cors" (default).
    #[serde(default)]
    pub mode: RequestMode,

    /// Request destination, e.g. "document", "script", "font" (default: empty).
    #[serde(default)]
    pub destination: Destination,

    /// Extra request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_method() -> String {
    "GET".into()
}

/// A response as reported by the tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResponseView {
    /// Final URL of the response.
    pub url: String,
    pub status: u16,
    pub status_text: String,
    /// Whether the status is in the 200-299 range.
    pub ok: bool,
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
    /// Body length in bytes.
    pub body_bytes: usize,
}

impl From<&Response> for ResponseView {
    fn from(response: &Response) -> Self {
        Self {
            url: response.url.clone(),
            status: response.status,
            status_text: response.status_text.clone(),
            ok: response.is_ok(),
            headers: response.headers.clone(),
            body: response.body_text().into_owned(),
            body_bytes: response.body.len(),
        }
    }
}

/// Output structure for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchOutput {
    /// Where the response came from.
    pub source: ResponseSource,
    pub response: ResponseView,
}

/// Implementation of the sw_fetch tool.
///
/// Requests the router passes through are completed with `network` directly.
pub async fn fetch_impl(
    router: &Router, network: &dyn Network, params: SwFetchParams,
) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let scope = router.config().scope_url()?;
    let url = canonicalize(&scope, &params.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

    let mut request = Request::get(url)
        .with_method(&params.method)
        .with_mode(params.mode)
        .with_destination(params.destination);
    for (name, value) in &params.headers {
        request = request.with_header(name, value);
    }

    let (response, source) = match router.fetch(&request).await? {
        FetchOutcome::Respond { response, source } => (response, source),
        FetchOutcome::Passthrough => (network.fetch(&request).await?, ResponseSource::Passthrough),
    };

    tracing::debug!(url = %request.url, ?source, status = response.status, "routed request");

    json_result(&SwFetchOutput { source, response: ResponseView::from(&response) })
}
