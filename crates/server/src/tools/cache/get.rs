//! cache_get tool implementation.
//!
//! Retrieves a cached response from the current generation by URL.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shellcache_client::{Router, canonicalize};
use shellcache_core::{Error, RequestKey};

use crate::tools::json_result;
use crate::tools::sw_fetch::ResponseView;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// URL of the cached request. Paths resolve against the app scope.
    pub url: String,

    /// HTTP method of the cached request (default: GET).
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".into()
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub generation: String,
    /// Request identity, e.g. `GET http://localhost:8080/index.html`.
    pub key: String,
    pub response: ResponseView,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(router: &Router, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let scope = router.config().scope_url()?;
    let url = canonicalize(&scope, &params.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let key = RequestKey::new(&params.method, &url);

    let response = router
        .store()
        .match_request(router.generation(), &key)
        .await?
        .ok_or_else(|| Error::CacheMiss(key.to_string()))?;

    json_result(&CacheGetOutput {
        generation: router.generation().to_string(),
        key: key.to_string(),
        response: ResponseView::from(&response),
    })
}
