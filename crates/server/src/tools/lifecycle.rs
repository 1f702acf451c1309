//! sw_install and sw_activate tool implementations.
//!
//! Also runs the boot sequence that installs and activates the configured
//! version before the server starts answering tool calls.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shellcache_client::Router;

use super::json_result;

/// Output from the sw_install tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InstallOutput {
    pub generation: String,
    /// Number of static assets stored.
    pub cached: usize,
    pub skip_waiting: bool,
    /// Worker state after the install.
    pub state: String,
}

/// Output from the sw_activate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActivateOutput {
    pub generation: String,
    /// Stale generations that were deleted.
    pub deleted: Vec<String>,
    pub claim_clients: bool,
    pub state: String,
}

/// Install then activate the configured version.
///
/// A failed install leaves the newest previous generation in service.
pub async fn boot(router: &Router) {
    if let Err(err) = router.install().await {
        let serving = router.serving().await;
        tracing::warn!(error = %err, %serving, "install failed; serving previous generation");
        return;
    }
    if let Err(err) = router.activate().await {
        tracing::warn!(error = %err, "activation failed");
    }
}

/// Implementation of the sw_install tool.
pub async fn install_impl(router: &Router) -> Result<CallToolResult, McpError> {
    let report = router.install().await?;
    json_result(&InstallOutput {
        generation: report.generation,
        cached: report.cached,
        skip_waiting: report.skip_waiting,
        state: router.state().await.to_string(),
    })
}

/// Implementation of the sw_activate tool.
pub async fn activate_impl(router: &Router) -> Result<CallToolResult, McpError> {
    let report = router.activate().await?;
    json_result(&ActivateOutput {
        generation: report.generation,
        deleted: report.deleted,
        claim_clients: report.claim_clients,
        state: router.state().await.to_string(),
    })
}
