//! Versioned cache storage for intercepted responses.
//!
//! A store holds named generations, each an isolated map from request
//! identity to captured response. Two backends are provided:
//!
//! - [`MemoryCacheStore`]: process-local, backed by a tokio `RwLock`
//! - [`CacheDb`]: persistent SQLite via tokio-rusqlite, with WAL mode and
//!   versioned schema migrations

pub mod connection;
pub mod entries;
pub mod hash;
pub mod memory;
pub mod migrations;

use async_trait::async_trait;

pub use crate::Error;
use crate::request::{RequestKey, Response};

pub use connection::CacheDb;
pub use memory::MemoryCacheStore;

/// Storage capability consumed by the router.
///
/// Implementations must tolerate concurrent calls; concurrent writes to the same
/// key resolve last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create the generation if it does not exist yet.
    async fn open(&self, generation: &str) -> Result<(), Error>;

    /// Look up a request in one generation. Missing generations match nothing.
    async fn match_request(&self, generation: &str, key: &RequestKey) -> Result<Option<Response>, Error>;

    /// Store a response, creating the generation if needed.
    async fn put(&self, generation: &str, key: &RequestKey, response: &Response) -> Result<(), Error>;

    /// Store every entry or none of them.
    async fn put_all(&self, generation: &str, entries: Vec<(RequestKey, Response)>) -> Result<(), Error>;

    /// Remove a generation and all its entries. Returns whether it existed.
    async fn delete_generation(&self, generation: &str) -> Result<bool, Error>;

    /// Generation names in creation order.
    async fn generations(&self) -> Result<Vec<String>, Error>;

    /// Request identities stored in a generation.
    async fn keys(&self, generation: &str) -> Result<Vec<RequestKey>, Error>;
}
