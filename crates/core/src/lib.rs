//! Core types and shared functionality for shellcache.
//!
//! This crate provides:
//! - Request/response model and request identity
//! - Cache store abstraction with in-memory and SQLite backends
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod request;

pub use cache::{CacheDb, CacheStore, MemoryCacheStore};
pub use config::{AppConfig, RouterConfig};
pub use error::Error;
pub use request::{Destination, Request, RequestKey, RequestMode, Response, ResponseSource};
