//! Request classification into routing policies.

use shellcache_core::{Destination, Request, RouterConfig};

/// Routing policy chosen for a request. First matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Live sync traffic: untouched, never cached.
    LiveData,
    /// Pages and documents: network, then cache, then shell.
    NetworkFirst,
    /// Everything else: cache, then network.
    CacheFirst,
}

/// Classify a request against the routing policy.
pub fn classify(config: &RouterConfig, request: &Request) -> Route {
    let path = request.path();

    if path.starts_with(&config.live_data_prefix) {
        return Route::LiveData;
    }

    if request.is_navigation()
        || request.destination == Destination::Document
        || config.document_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
        || path == "/"
        || path.is_empty()
    {
        return Route::NetworkFirst;
    }

    Route::CacheFirst
}
