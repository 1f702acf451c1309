//! Deterministic collaborators for router tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shellcache_core::{CacheStore, Error, MemoryCacheStore, Request, RequestKey, Response};

use crate::fetch::Network;

enum Reply {
    Respond(u16, String),
    Fail,
}

/// Scripted network. URLs without a scripted reply reject as if offline.
#[derive(Default)]
pub struct FakeNetwork {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Respond(status, body.to_string()));
    }

    pub fn fail(&self, url: &str) {
        self.replies.lock().unwrap().insert(url.to_string(), Reply::Fail);
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        let url = request.url.as_str().to_string();
        self.calls.lock().unwrap().push(url.clone());
        match self.replies.lock().unwrap().get(&url) {
            Some(Reply::Respond(status, body)) => Ok(Response::new(url.clone(), *status, body.clone())),
            Some(Reply::Fail) | None => Err(Error::Network(format!("unreachable: {url}"))),
        }
    }
}

/// Memory store that counts every read and write.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryCacheStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn open(&self, generation: &str) -> Result<(), Error> {
        self.write();
        self.inner.open(generation).await
    }

    async fn match_request(&self, generation: &str, key: &RequestKey) -> Result<Option<Response>, Error> {
        self.read();
        self.inner.match_request(generation, key).await
    }

    async fn put(&self, generation: &str, key: &RequestKey, response: &Response) -> Result<(), Error> {
        self.write();
        self.inner.put(generation, key, response).await
    }

    async fn put_all(&self, generation: &str, entries: Vec<(RequestKey, Response)>) -> Result<(), Error> {
        self.write();
        self.inner.put_all(generation, entries).await
    }

    async fn delete_generation(&self, generation: &str) -> Result<bool, Error> {
        self.write();
        self.inner.delete_generation(generation).await
    }

    async fn generations(&self) -> Result<Vec<String>, Error> {
        self.read();
        self.inner.generations().await
    }

    async fn keys(&self, generation: &str) -> Result<Vec<RequestKey>, Error> {
        self.read();
        self.inner.keys(generation).await
    }
}

/// Store whose writes fail, as when storage quota is exhausted.
#[derive(Default)]
pub struct FullStore {
    pub inner: MemoryCacheStore,
}

#[async_trait]
impl CacheStore for FullStore {
    async fn open(&self, generation: &str) -> Result<(), Error> {
        self.inner.open(generation).await
    }

    async fn match_request(&self, generation: &str, key: &RequestKey) -> Result<Option<Response>, Error> {
        self.inner.match_request(generation, key).await
    }

    async fn put(&self, _generation: &str, _key: &RequestKey, _response: &Response) -> Result<(), Error> {
        Err(Error::Corrupt("quota exceeded".into()))
    }

    async fn put_all(&self, _generation: &str, _entries: Vec<(RequestKey, Response)>) -> Result<(), Error> {
        Err(Error::Corrupt("quota exceeded".into()))
    }

    async fn delete_generation(&self, generation: &str) -> Result<bool, Error> {
        self.inner.delete_generation(generation).await
    }

    async fn generations(&self) -> Result<Vec<String>, Error> {
        self.inner.generations().await
    }

    async fn keys(&self, generation: &str) -> Result<Vec<RequestKey>, Error> {
        self.inner.keys(generation).await
    }
}
