//! cache_list tool implementation.
//!
//! Lists cache generations and how many entries each holds.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shellcache_client::Router;

use crate::tools::json_result;

/// One cache generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationSummary {
    pub name: String,
    pub entries: usize,
    /// Whether this is the generation the router reads and writes.
    pub current: bool,
}

/// Output from the cache_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheListOutput {
    pub current: String,
    /// Generation fetches read from; differs from `current` after a failed install.
    pub serving: String,
    /// Worker lifecycle state.
    pub state: String,
    pub generations: Vec<GenerationSummary>,
}

/// Implementation of the cache_list tool.
pub async fn list_impl(router: &Router) -> Result<CallToolResult, McpError> {
    let store = router.store();
    let mut generations = Vec::new();
    for name in store.generations().await? {
        let entries = store.keys(&name).await?.len();
        let current = name == router.generation();
        generations.push(GenerationSummary { name, entries, current });
    }

    json_result(&CacheListOutput {
        current: router.generation().to_string(),
        serving: router.serving().await,
        state: router.state().await.to_string(),
        generations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{app_network, output, router};
    use shellcache_core::CacheStore;

    #[tokio::test]
    async fn test_list_empty() {
        let (router, _) = router(app_network());
        let out: CacheListOutput = output(&list_impl(&router).await.unwrap());
        assert_eq!(out.current, "siteinspector-v5");
        assert_eq!(out.serving, "siteinspector-v5");
        assert_eq!(out.state, "parsed");
        assert!(out.generations.is_empty());
    }

    #[tokio::test]
    async fn test_list_counts_entries() {
        let (router, store) = router(app_network());
        store.open("siteinspector-v4").await.unwrap();
        router.install().await.unwrap();

        let out: CacheListOutput = output(&list_impl(&router).await.unwrap());
        assert_eq!(out.generations.len(), 2);
        assert_eq!(out.generations[0].name, "siteinspector-v4");
        assert_eq!(out.generations[0].entries, 0);
        assert!(!out.generations[0].current);
        assert_eq!(out.generations[1].entries, 2);
        assert!(out.generations[1].current);
    }
}
