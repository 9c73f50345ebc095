//! Execution context: the key a registry is looked up by.
//!
//! Rather than a bare global variable, the sharding context is owned by an
//! [`ExecutionContext`] threaded through (or retrievable from) the code that
//! needs it. A process that truly has one registry for its whole lifetime
//! reaches it through [`ExecutionContext::global`]; test harnesses construct
//! isolated contexts so nothing leaks between cases.

use std::sync::OnceLock;

use crate::sharding::ShardingContext;

/// Caller-supplied key locating the sharding context relevant to the
/// current process or test harness.
///
/// Each context owns exactly one [`ShardingContext`] for the context's
/// lifetime, so lookups through the same context always resolve to the same
/// instance and distinct contexts never share one.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    sharding: ShardingContext,
}

impl ExecutionContext {
    /// Create an isolated context owning a fresh, uninitialized sharding
    /// registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sharding: ShardingContext::new(),
        }
    }

    /// The process-lifetime context, for processes that have exactly one
    /// registry for their whole lifetime.
    ///
    /// Lazily constructed on first use; the owned registry starts
    /// uninitialized and is made ready by the startup path calling
    /// [`ShardingContext::init`].
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<ExecutionContext> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Borrow the sharding context owned by this execution context.
    #[must_use]
    pub fn sharding(&self) -> &ShardingContext {
        &self.sharding
    }

    /// Mutably borrow the sharding context.
    ///
    /// Only teardown paths need this; see
    /// [`ShardingContext::clear_for_unit_tests`].
    pub fn sharding_mut(&mut self) -> &mut ShardingContext {
        &mut self.sharding
    }
}
