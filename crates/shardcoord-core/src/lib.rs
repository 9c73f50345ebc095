//! # shardcoord-core
//!
//! Process-wide sharding coordination context for cluster-coordinator
//! processes.
//!
//! A coordinator process owns a handful of long-lived subsystems: a catalog
//! manager for persisted cluster metadata, a cache in front of it, a registry
//! of known data-bearing shards, and a manager for in-flight distributed
//! query cursors. This crate provides the single object through which the
//! rest of the process reaches those subsystems — the
//! [`ShardingContext`] — together with the thread-safe high-water-mark of
//! the most recently observed configuration-store operation time
//! ([`ConfigOpTime`]) used to bound how stale a read against replicated
//! configuration metadata may be.
//!
//! ## Components
//!
//! - [`ShardingContext`]: owns the four subsystems, gates one-time
//!   initialization, and serializes access to the causal-read watermark
//! - [`ConfigOpTime`]: totally-ordered marker of configuration-store state
//! - [`ExecutionContext`]: the key a registry is looked up by; owns one
//!   registry for the process or for an isolated test harness
//! - [`ShardingConfig`]: TOML startup configuration
//! - [`subsystem`]: the collaborator trait seams
//!   ([`CatalogManager`], [`CatalogCache`], [`ShardRegistry`],
//!   [`ClusterCursorManager`])
//!
//! ## Concurrency model
//!
//! Many threads share one registry. Only the watermark takes a lock, and its
//! critical section is a scalar copy or compare-and-store. The subsystem
//! handles are installed exactly once, before the registry is published to
//! other threads; the install provides the happens-before edge readers rely
//! on. Nothing here suspends or blocks on I/O.
//!
//! ## Example
//!
//! ```rust
//! use shardcoord_core::{
//!     CatalogCache, CatalogManager, ClusterCursorManager, ConfigOpTime,
//!     ExecutionContext, ShardRegistry, ShardingContext,
//! };
//!
//! struct Catalog;
//! impl CatalogManager for Catalog {}
//!
//! struct Cache;
//! impl CatalogCache for Cache {}
//!
//! struct Shards;
//! impl ShardRegistry for Shards {
//!     fn shutdown(&self) {}
//!     fn is_shut_down(&self) -> bool {
//!         false
//!     }
//! }
//!
//! struct Cursors;
//! impl ClusterCursorManager for Cursors {}
//!
//! let context = ExecutionContext::new();
//! let sharding = ShardingContext::get(&context);
//! sharding
//!     .init(
//!         Box::new(Catalog),
//!         Box::new(Cache),
//!         Box::new(Shards),
//!         Box::new(Cursors),
//!     )
//!     .expect("first initialization");
//!
//! sharding.advance_config_optime(ConfigOpTime::new(1, 42));
//! assert_eq!(sharding.config_optime(), ConfigOpTime::new(1, 42));
//! assert!(sharding.shard_registry().is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod optime;
pub mod sharding;
pub mod subsystem;

pub use config::{ConfigError, ShardingConfig};
pub use context::ExecutionContext;
pub use optime::ConfigOpTime;
pub use sharding::{InitError, ShardingContext};
pub use subsystem::{CatalogCache, CatalogManager, ClusterCursorManager, ShardRegistry};
