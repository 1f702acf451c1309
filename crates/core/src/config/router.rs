//! Routing configuration for one deployed app version.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// Immutable routing policy handed to the router at construction.
///
/// Bumping `cache_name` is the only way to invalidate everything cached by a
/// previous deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Name of the current cache generation.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,

    /// URLs precached at install, relative entries resolved against `scope`.
    #[serde(default = "default_static_assets")]
    pub static_assets: Vec<String>,

    /// Path prefix for live sync traffic that must never be cached.
    #[serde(default = "default_live_data_prefix")]
    pub live_data_prefix: String,

    /// Application shell document served when a page is unreachable.
    #[serde(default = "default_shell_root")]
    pub shell_root: String,

    /// Path suffixes routed network-first as documents.
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,

    /// Base URL the application is served from.
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_cache_name() -> String {
    "siteinspector-v5".into()
}

fn default_static_assets() -> Vec<String> {
    [
        "./",
        "./index.html",
        "./manifest.json",
        "https://fonts.googleapis.com/css2?family=DM+Sans:wght@400;500;600;700&family=JetBrains+Mono:wght@400;500&display=swap",
        "https://cdnjs.cloudflare.com/ajax/libs/pouchdb/9.0.0/pouchdb.min.js",
        "https://cdnjs.cloudflare.com/ajax/libs/jspdf/2.5.1/jspdf.umd.min.js",
        "https://cdnjs.cloudflare.com/ajax/libs/jspdf-autotable/3.5.31/jspdf.plugin.autotable.min.js",
        "https://cdnjs.cloudflare.com/ajax/libs/xlsx/0.18.5/xlsx.full.min.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_live_data_prefix() -> String {
    "/db".into()
}

fn default_shell_root() -> String {
    "./index.html".into()
}

fn default_document_extensions() -> Vec<String> {
    vec![".html".into()]
}

fn default_scope() -> String {
    "http://localhost:8080/".into()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_name: default_cache_name(),
            static_assets: default_static_assets(),
            live_data_prefix: default_live_data_prefix(),
            shell_root: default_shell_root(),
            document_extensions: default_document_extensions(),
            scope: default_scope(),
        }
    }
}

impl RouterConfig {
    /// Same policy under a different generation name, as after a deploy.
    pub fn with_cache_name(mut self, cache_name: impl Into<String>) -> Self {
        self.cache_name = cache_name.into();
        self
    }

    pub fn scope_url(&self) -> Result<Url, Error> {
        let scope = Url::parse(&self.scope).map_err(|e| Error::InvalidUrl(format!("scope {}: {e}", self.scope)))?;
        match scope.scheme() {
            "http" | "https" => Ok(scope),
            other => Err(Error::InvalidUrl(format!("scope {}: unsupported scheme {other}", self.scope))),
        }
    }

    /// Resolve a configured URL (absolute or scope-relative) without its fragment.
    pub fn resolve(&self, location: &str) -> Result<Url, Error> {
        let mut url = self
            .scope_url()?
            .join(location)
            .map_err(|e| Error::InvalidUrl(format!("{location}: {e}")))?;
        url.set_fragment(None);
        Ok(url)
    }

    /// Absolute URL of the application shell document.
    pub fn shell_url(&self) -> Result<Url, Error> {
        self.resolve(&self.shell_root)
    }
}
