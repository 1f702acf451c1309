//! Shared fixtures for tool tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde::de::DeserializeOwned;
use shellcache_client::{Network, Router};
use shellcache_core::{Error, MemoryCacheStore, Request, Response, RouterConfig};

/// Network answering from a fixed table; other URLs reject.
#[derive(Default)]
pub struct TableNetwork {
    pages: Mutex<HashMap<String, (u16, String)>>,
}

impl TableNetwork {
    pub fn with(self, url: &str, status: u16, body: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, body.to_string()));
        self
    }
}

#[async_trait]
impl Network for TableNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        let url = request.url.to_string();
        let page = self.pages.lock().unwrap().get(&url).cloned();
        match page {
            Some((status, body)) => Ok(Response::new(url, status, body)),
            None => Err(Error::Network(format!("unreachable: {url}"))),
        }
    }
}

pub fn config() -> RouterConfig {
    RouterConfig {
        static_assets: vec!["./".into(), "./index.html".into()],
        scope: "http://localhost:8080/".into(),
        ..Default::default()
    }
}

pub fn app_network() -> Arc<TableNetwork> {
    Arc::new(
        TableNetwork::default()
            .with("http://localhost:8080/", 200, "shell")
            .with("http://localhost:8080/index.html", 200, "shell")
            .with("http://localhost:8080/db/sync", 200, "{\"ok\":true}"),
    )
}

pub fn router(network: Arc<TableNetwork>) -> (Router, MemoryCacheStore) {
    let store = MemoryCacheStore::new();
    (Router::new(config(), Arc::new(store.clone()), network), store)
}

/// Decode the JSON text content of a tool result.
pub fn output<T: DeserializeOwned>(result: &CallToolResult) -> T {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    let text = content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
