//! The process-wide sharding context registry.
//!
//! One [`ShardingContext`] exists per execution context (one per running
//! coordinator process; test harnesses construct isolated ones). It owns
//! the four coordination subsystems, gates their one-time installation, and
//! serializes access to the causal-read watermark.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init()--> Ready --clear_for_unit_tests()--> Uninitialized
//! ```
//!
//! Subsystem accessors return `Some` only from `Ready`. The watermark and
//! the localhost flag are usable from either state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ShardingConfig;
use crate::context::ExecutionContext;
use crate::optime::ConfigOpTime;
use crate::subsystem::{CatalogCache, CatalogManager, ClusterCursorManager, ShardRegistry};

/// Errors from violating the registry's one-time initialization contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// `init` was called on a registry that is already ready. The installed
    /// subsystems are untouched; the rejected ones are dropped.
    #[error("sharding context is already initialized")]
    AlreadyInitialized,
}

/// The four subsystems installed together by [`ShardingContext::init`].
struct Subsystems {
    catalog_manager: Box<dyn CatalogManager>,
    catalog_cache: Box<dyn CatalogCache>,
    shard_registry: Box<dyn ShardRegistry>,
    cursor_manager: Box<dyn ClusterCursorManager>,
}

/// Process-wide sharding context.
///
/// Constructed uninitialized, made ready exactly once by [`init`], and from
/// then on the single place through which the process reaches its
/// coordination subsystems and reads or advances the causal-read watermark.
///
/// Borrows handed out by the subsystem accessors are valid only while the
/// registry itself is alive and uncleared; [`clear_for_unit_tests`] takes
/// `&mut self`, so retaining a borrow across teardown fails to compile.
///
/// [`init`]: ShardingContext::init
/// [`clear_for_unit_tests`]: ShardingContext::clear_for_unit_tests
pub struct ShardingContext {
    /// Subsystems installed exactly once by [`ShardingContext::init`].
    ///
    /// The cell's set-once guarantee is the initialization guard: the
    /// winning `set` establishes the happens-before edge readers rely on,
    /// and a losing `set` is rejected without touching the stored value.
    subsystems: OnceLock<Subsystems>,

    /// Highest configuration operation time observed so far.
    ///
    /// Protected by its own mutex. The critical section is a scalar copy
    /// or compare-and-store; no blocking work happens under the lock.
    config_optime: Mutex<ConfigOpTime>,

    /// Whether shards and configuration servers may use localhost
    /// addresses. Plain flag with set-before-read discipline; relaxed
    /// ordering carries no synchronization beyond that.
    allow_local_host: AtomicBool,
}

impl ShardingContext {
    /// Construct an uninitialized registry: no subsystems, unset watermark,
    /// localhost disallowed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subsystems: OnceLock::new(),
            config_optime: Mutex::new(ConfigOpTime::default()),
            allow_local_host: AtomicBool::new(false),
        }
    }

    /// Resolve the registry associated with an execution context.
    ///
    /// Pure lookup: the same context always yields the same instance.
    #[must_use]
    pub fn get(context: &ExecutionContext) -> &Self {
        context.sharding()
    }

    /// Install the four coordination subsystems, transferring exclusive
    /// ownership to the registry and making it ready.
    ///
    /// Must be called once and once only per logical lifetime; the
    /// compare-and-set guard rejects re-entry instead of overwriting the
    /// installed subsystems. Callers should treat a rejection as a fatal
    /// startup bug.
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] if the registry is already ready.
    pub fn init(
        &self,
        catalog_manager: Box<dyn CatalogManager>,
        catalog_cache: Box<dyn CatalogCache>,
        shard_registry: Box<dyn ShardRegistry>,
        cursor_manager: Box<dyn ClusterCursorManager>,
    ) -> Result<(), InitError> {
        let installed = self.subsystems.set(Subsystems {
            catalog_manager,
            catalog_cache,
            shard_registry,
            cursor_manager,
        });
        if installed.is_err() {
            warn!("rejected repeated sharding context initialization");
            return Err(InitError::AlreadyInitialized);
        }
        info!("sharding context initialized");
        Ok(())
    }

    /// Whether [`init`](ShardingContext::init) has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.subsystems.get().is_some()
    }

    /// Apply startup configuration. Call before the registry is published
    /// to other threads.
    pub fn apply_config(&self, config: &ShardingConfig) {
        self.set_allow_local_host(config.allow_local_host);
    }

    /// The catalog manager, or `None` before initialization.
    #[must_use]
    pub fn catalog_manager(&self) -> Option<&dyn CatalogManager> {
        self.subsystems.get().map(|s| s.catalog_manager.as_ref())
    }

    /// The catalog cache, or `None` before initialization.
    #[must_use]
    pub fn catalog_cache(&self) -> Option<&dyn CatalogCache> {
        self.subsystems.get().map(|s| s.catalog_cache.as_ref())
    }

    /// The shard registry, or `None` before initialization.
    #[must_use]
    pub fn shard_registry(&self) -> Option<&dyn ShardRegistry> {
        self.subsystems.get().map(|s| s.shard_registry.as_ref())
    }

    /// The cluster cursor manager, or `None` before initialization.
    #[must_use]
    pub fn cursor_manager(&self) -> Option<&dyn ClusterCursorManager> {
        self.subsystems.get().map(|s| s.cursor_manager.as_ref())
    }

    /// Whether shards and configuration servers may use localhost
    /// addresses.
    #[must_use]
    pub fn allow_local_host(&self) -> bool {
        self.allow_local_host.load(Ordering::Relaxed)
    }

    /// Permit or forbid localhost addresses for shards and configuration
    /// servers. Callers establish set-before-read themselves.
    pub fn set_allow_local_host(&self, allow: bool) {
        self.allow_local_host.store(allow, Ordering::Relaxed);
    }

    /// The highest configuration operation time observed so far.
    #[must_use]
    pub fn config_optime(&self) -> ConfigOpTime {
        *self
            .config_optime
            .lock()
            .expect("config optime lock poisoned")
    }

    /// Advance the causal-read watermark.
    ///
    /// Monotonic-max policy: a value at or below the current watermark is a
    /// silent no-op, so the stored watermark never regresses regardless of
    /// how calls interleave across threads.
    pub fn advance_config_optime(&self, optime: ConfigOpTime) {
        let mut current = self
            .config_optime
            .lock()
            .expect("config optime lock poisoned");
        if optime > *current {
            *current = optime;
        }
    }

    /// Tear the registry back down to the uninitialized state so one
    /// instance can be reused across test cases.
    ///
    /// Releases ownership of all four subsystems and resets the watermark
    /// and the localhost flag to their defaults. Taking `&mut self` makes
    /// "not safe to call concurrently with any other operation" a
    /// borrow-check guarantee rather than a comment.
    ///
    /// Precondition (unchecked): the owned shard registry has already been
    /// shut down. Do not use outside of test harnesses.
    pub fn clear_for_unit_tests(&mut self) {
        debug!("clearing sharding context for test reuse");
        drop(self.subsystems.take());
        *self
            .config_optime
            .get_mut()
            .expect("config optime lock poisoned") = ConfigOpTime::default();
        *self.allow_local_host.get_mut() = false;
    }
}

impl Default for ShardingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardingContext")
            .field("initialized", &self.is_initialized())
            .field("config_optime", &self.config_optime())
            .field("allow_local_host", &self.allow_local_host())
            .finish_non_exhaustive()
    }
}
