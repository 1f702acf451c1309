//! Client code for shellcache.
//!
//! This crate provides the network capability and the offline-caching
//! request router that sits between a page and the network.

pub mod fetch;
pub mod router;

pub use fetch::{FetchConfig, HttpNetwork, Network, canonicalize};
pub use router::{ActivateReport, FetchOutcome, InstallReport, Route, Router, WorkerState, classify};
