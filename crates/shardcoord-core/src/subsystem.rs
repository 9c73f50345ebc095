//! Collaborator seams owned by the sharding context.
//!
//! The registry owns exactly one of each of these for its lifetime and hands
//! out non-owning borrows. Their domain logic lives entirely behind the
//! trait boundary; the registry wires ownership and lifecycle, nothing else.

/// Accesses persisted cluster catalog metadata on the configuration store.
pub trait CatalogManager: Send + Sync {}

/// Caches catalog-manager reads.
pub trait CatalogCache: Send + Sync {}

/// Tracks the set of known data-bearing shards.
///
/// Teardown of the owning registry requires the shard registry to be
/// quiesced first; `shutdown` and `is_shut_down` make that precondition
/// observable to callers and harnesses.
pub trait ShardRegistry: Send + Sync {
    /// Stop background refresh work and reject further lookups.
    fn shutdown(&self);

    /// Whether `shutdown` has completed.
    fn is_shut_down(&self) -> bool;
}

/// Tracks in-flight distributed query cursors.
pub trait ClusterCursorManager: Send + Sync {}
