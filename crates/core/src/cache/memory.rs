//! In-memory cache store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CacheStore;
use crate::Error;
use crate::request::{RequestKey, Response};

#[derive(Debug, Default)]
struct Generation {
    seq: u64,
    entries: HashMap<RequestKey, Response>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    generations: HashMap<String, Generation>,
}

impl Inner {
    fn open(&mut self, name: &str) -> &mut Generation {
        let next_seq = &mut self.next_seq;
        self.generations.entry(name.to_string()).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            Generation { seq, entries: HashMap::new() }
        })
    }
}

/// Cache store held entirely in process memory.
///
/// Uses a HashMap of generations behind a tokio RwLock. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn open(&self, generation: &str) -> Result<(), Error> {
        self.inner.write().await.open(generation);
        Ok(())
    }

    async fn match_request(&self, generation: &str, key: &RequestKey) -> Result<Option<Response>, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .generations
            .get(generation)
            .and_then(|g| g.entries.get(key))
            .cloned())
    }

    async fn put(&self, generation: &str, key: &RequestKey, response: &Response) -> Result<(), Error> {
        let mut inner = self.inner.write().await;
        inner.open(generation).entries.insert(key.clone(), response.clone());
        Ok(())
    }

    async fn put_all(&self, generation: &str, entries: Vec<(RequestKey, Response)>) -> Result<(), Error> {
        let mut inner = self.inner.write().await;
        inner.open(generation).entries.extend(entries);
        Ok(())
    }

    async fn delete_generation(&self, generation: &str) -> Result<bool, Error> {
        Ok(self.inner.write().await.generations.remove(generation).is_some())
    }

    async fn generations(&self) -> Result<Vec<String>, Error> {
        let inner = self.inner.read().await;
        let mut names: Vec<(&String, u64)> = inner.generations.iter().map(|(n, g)| (n, g.seq)).collect();
        names.sort_by_key(|(_, seq)| *seq);
        Ok(names.into_iter().map(|(n, _)| n.clone()).collect())
    }

    async fn keys(&self, generation: &str) -> Result<Vec<RequestKey>, Error> {
        let inner = self.inner.read().await;
        let mut keys: Vec<RequestKey> = inner
            .generations
            .get(generation)
            .map(|g| g.entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}
