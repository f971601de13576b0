//! Offline maintenance tools for a time-series storage node.
//!
//! The tools here run against a stopped (or maintenance-mode) node: they open
//! the node's metadata snapshot and shard directories directly instead of
//! going through a running server process.

pub mod config;
pub mod droprp;
pub mod error;
pub mod meta;
pub mod store;

pub use config::Config;
pub use droprp::DropRequest;
pub use error::{Error, Result};
pub use meta::{FileMetaClient, MetaClient};
pub use store::{LocalStore, ShardStore};
