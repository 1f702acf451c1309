//! Request router and cache manager.
//!
//! Owns one cache generation and the three lifecycle handlers:
//!
//! - [`Router::install`] precaches the static asset list, all or nothing
//! - [`Router::activate`] deletes every other generation
//! - [`Router::fetch`] routes one intercepted request
//!
//! Routing (first match wins):
//!
//! 1. Live-data prefix: pass through, cache never touched
//! 2. Navigations and documents: network first, then cache, then shell
//! 3. Everything else: cache first, then network
//!
//! Fetches read and write the serving generation. That is the configured
//! generation, except after a failed install, when the newest previous
//! generation keeps serving until an install succeeds.

pub mod lifecycle;
pub mod route;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use futures_util::future::try_join_all;
use shellcache_core::{CacheStore, Error, Request, RequestKey, Response, ResponseSource, RouterConfig};
use tokio::sync::RwLock;

use crate::fetch::Network;

pub use lifecycle::{ActivateReport, InstallReport, WorkerState};
pub use route::{Route, classify};

/// What the host should do with an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not handled; the host performs its default network fetch.
    Passthrough,
    /// Answer the page with this response.
    Respond { response: Response, source: ResponseSource },
}

impl FetchOutcome {
    fn respond(response: Response, source: ResponseSource) -> Self {
        FetchOutcome::Respond { response, source }
    }
}

/// Offline-caching router for one app version.
pub struct Router {
    config: Arc<RouterConfig>,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    state: RwLock<WorkerState>,
    serving: RwLock<String>,
}

impl Router {
    pub fn new(config: RouterConfig, store: Arc<dyn CacheStore>, network: Arc<dyn Network>) -> Self {
        let serving = RwLock::new(config.cache_name.clone());
        Self { config: Arc::new(config), store, network, state: RwLock::new(WorkerState::default()), serving }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Name of the current cache generation.
    pub fn generation(&self) -> &str {
        &self.config.cache_name
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    async fn set_state(&self, state: WorkerState) {
        *self.state.write().await = state;
    }

    /// Generation that fetches currently read from and write to.
    pub async fn serving(&self) -> String {
        self.serving.read().await.clone()
    }

    async fn serve(&self, generation: &str) {
        let mut serving = self.serving.write().await;
        if *serving != generation {
            tracing::info!(from = serving.as_str(), to = generation, "switching serving generation");
            *serving = generation.to_string();
        }
    }

    /// Newest generation other than the configured one.
    async fn previous_generation(&self) -> Result<Option<String>, Error> {
        let generations = self.store.generations().await?;
        Ok(generations.into_iter().rev().find(|name| *name != self.config.cache_name))
    }

    /// Precache every static asset into the current generation.
    ///
    /// Any fetch that rejects or returns a non-ok status fails the install and
    /// nothing is stored; the router becomes [`WorkerState::Redundant`] and
    /// keeps serving the newest previous generation, if there is one.
    pub async fn install(&self) -> Result<InstallReport, Error> {
        self.set_state(WorkerState::Installing).await;

        match self.precache().await {
            Ok(cached) => {
                self.serve(&self.config.cache_name).await;
                self.set_state(WorkerState::Installed).await;
                tracing::info!(generation = %self.config.cache_name, cached, "install complete");
                Ok(InstallReport { generation: self.config.cache_name.clone(), cached, skip_waiting: true })
            }
            Err(err) => {
                self.set_state(WorkerState::Redundant).await;
                tracing::warn!(generation = %self.config.cache_name, error = %err, "install failed");
                match self.previous_generation().await {
                    Ok(Some(previous)) => self.serve(&previous).await,
                    Ok(None) => {}
                    Err(lookup) => tracing::warn!(error = %lookup, "could not list previous generations"),
                }
                Err(err)
            }
        }
    }

    async fn precache(&self) -> Result<usize, Error> {
        let generation = &self.config.cache_name;
        self.store.open(generation).await?;

        let requests = self
            .config
            .static_assets
            .iter()
            .map(|asset| self.config.resolve(asset).map(Request::get))
            .collect::<Result<Vec<_>, _>>()?;

        let entries = try_join_all(requests.iter().map(|request| self.precache_one(request))).await?;

        let cached = entries.len();
        self.store.put_all(generation, entries).await?;
        Ok(cached)
    }

    async fn precache_one(&self, request: &Request) -> Result<(RequestKey, Response), Error> {
        let response = self
            .network
            .fetch(request)
            .await
            .map_err(|e| Error::InstallFailed { url: request.url.to_string(), reason: e.to_string() })?;
        if !response.is_ok() {
            return Err(Error::InstallFailed { url: request.url.to_string(), reason: format!("status {}", response.status) });
        }
        Ok((request.key(), response))
    }

    /// Delete every generation except the current one, then claim clients.
    pub async fn activate(&self) -> Result<ActivateReport, Error> {
        let previous = self.state().await;
        if !previous.can_activate() {
            return Err(Error::InvalidState(format!("cannot activate from state {previous}")));
        }
        self.set_state(WorkerState::Activating).await;

        match self.purge_stale().await {
            Ok(deleted) => {
                self.serve(&self.config.cache_name).await;
                self.set_state(WorkerState::Activated).await;
                tracing::info!(generation = %self.config.cache_name, deleted = deleted.len(), "activated");
                Ok(ActivateReport { generation: self.config.cache_name.clone(), deleted, claim_clients: true })
            }
            Err(err) => {
                self.set_state(previous).await;
                Err(err)
            }
        }
    }

    async fn purge_stale(&self) -> Result<Vec<String>, Error> {
        let current = &self.config.cache_name;
        let stale: Vec<String> = self
            .store
            .generations()
            .await?
            .into_iter()
            .filter(|name| name != current)
            .collect();

        try_join_all(stale.iter().map(|name| self.store.delete_generation(name))).await?;

        for name in &stale {
            tracing::debug!(generation = %name, "deleted stale generation");
        }
        Ok(stale)
    }

    /// Route one intercepted request.
    ///
    /// # Errors
    ///
    /// Returns the network error when no response can be supplied, and any
    /// cache store error.
    pub async fn fetch(&self, request: &Request) -> Result<FetchOutcome, Error> {
        match classify(&self.config, request) {
            Route::LiveData => {
                tracing::debug!(url = %request.url, "live data, passing through");
                Ok(FetchOutcome::Passthrough)
            }
            Route::NetworkFirst => self.network_first(request).await,
            Route::CacheFirst => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &Request) -> Result<FetchOutcome, Error> {
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_if_ok(request, &response).await;
                Ok(FetchOutcome::respond(response, ResponseSource::Network))
            }
            Err(err) => {
                tracing::warn!(url = %request.url, error = %err, "network failed, serving from cache");
                if let Some(cached) = self.lookup(request).await? {
                    return Ok(FetchOutcome::respond(cached, ResponseSource::Cache));
                }
                self.shell_fallback(err).await
            }
        }
    }

    async fn cache_first(&self, request: &Request) -> Result<FetchOutcome, Error> {
        if let Some(cached) = self.lookup(request).await? {
            tracing::debug!(url = %request.url, "cache hit");
            return Ok(FetchOutcome::respond(cached, ResponseSource::Cache));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_if_ok(request, &response).await;
                Ok(FetchOutcome::respond(response, ResponseSource::Network))
            }
            // Unreachable through `fetch` while navigations classify as network-first.
            Err(err) if request.is_navigation() => self.shell_fallback(err).await,
            Err(err) => Err(err),
        }
    }

    async fn lookup(&self, request: &Request) -> Result<Option<Response>, Error> {
        let key = request.key();
        if !key.is_cacheable() {
            return Ok(None);
        }
        self.store.match_request(&self.serving().await, &key).await
    }

    /// Store a successful GET response. A failed write is logged; the caller
    /// still gets the network response.
    async fn store_if_ok(&self, request: &Request, response: &Response) {
        if !response.is_ok() {
            return;
        }
        let key = request.key();
        if !key.is_cacheable() {
            tracing::debug!(%key, "not caching non-GET response");
            return;
        }
        let generation = self.serving().await;
        if let Err(err) = self.store.put(&generation, &key, response).await {
            tracing::warn!(%key, %generation, error = %err, "failed to cache response");
        }
    }

    async fn shell_fallback(&self, err: Error) -> Result<FetchOutcome, Error> {
        let shell = Request::get(self.config.shell_url()?);
        match self.store.match_request(&self.serving().await, &shell.key()).await? {
            Some(cached) => Ok(FetchOutcome::respond(cached, ResponseSource::ShellFallback)),
            None => {
                tracing::warn!(shell = %shell.url, "no cached shell to fall back to");
                Err(err)
            }
        }
    }
}
