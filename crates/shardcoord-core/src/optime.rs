//! Configuration operation time.
//!
//! [`ConfigOpTime`] is the authoritative ordering marker for replicated
//! configuration-store state. It is opaque to the registry: the replication
//! layer produces values, the registry only compares and stores them. The
//! derived total order is what makes the causal-read watermark meaningful —
//! a reader that has observed operation time `t` must be served
//! configuration metadata at least as new as `t`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Totally-ordered marker of the most recent configuration-store state a
/// process has observed.
///
/// The derived ordering is lexicographic on `(epoch, seq)`: the replication
/// epoch compares first, the sequence number breaks ties within an epoch.
/// The default value `0.0` is the unset watermark a fresh registry starts
/// from and orders before every committed operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct ConfigOpTime {
    /// Replication epoch the operation was committed in.
    pub epoch: u64,
    /// Sequence number of the operation within its epoch.
    pub seq: u64,
}

impl ConfigOpTime {
    /// Create an operation time from an epoch and a sequence number.
    #[must_use]
    pub const fn new(epoch: u64, seq: u64) -> Self {
        Self { epoch, seq }
    }

    /// Whether this is the unset watermark of a freshly constructed
    /// registry.
    #[must_use]
    pub const fn is_initial(self) -> bool {
        self.epoch == 0 && self.seq == 0
    }
}

impl fmt::Display for ConfigOpTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.epoch, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_dominates_seq_in_ordering() {
        let early_epoch = ConfigOpTime::new(1, 999);
        let late_epoch = ConfigOpTime::new(2, 0);

        assert!(early_epoch < late_epoch);
        assert!(ConfigOpTime::new(2, 1) > late_epoch);
        assert_eq!(ConfigOpTime::new(2, 1), ConfigOpTime::new(2, 1));
    }

    #[test]
    fn default_is_initial_and_orders_first() {
        let initial = ConfigOpTime::default();

        assert!(initial.is_initial());
        assert!(!ConfigOpTime::new(0, 1).is_initial());
        assert!(initial < ConfigOpTime::new(0, 1));
    }

    #[test]
    fn display_renders_epoch_dot_seq() {
        assert_eq!(ConfigOpTime::new(3, 17).to_string(), "3.17");
    }
}
