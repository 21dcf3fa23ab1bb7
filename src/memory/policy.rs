//! Pluggable page replacement policies.

pub mod fifo;
pub mod lru;
pub mod optimal;

use crate::memory::frame::{Frame, FrameId};
use crate::trace::AccessRequest;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;

/// Victim selection strategy, chosen once per simulation run.
///
/// Implementations must be deterministic and break ties by lowest frame
/// index, so identical inputs always produce identical eviction sequences.
pub trait ReplacementPolicy: Send + Debug {
    /// Stable algorithm name for logs and reports.
    fn name(&self) -> &'static str;

    /// Select an occupied frame to evict. Called only when every frame is
    /// occupied; `lookahead` is the ordered sequence of strictly-future
    /// accesses (empty when the driver supplied no reference trace).
    fn select_victim(
        &self,
        frames: &[Frame],
        request: &AccessRequest,
        lookahead: &[AccessRequest],
    ) -> Option<FrameId>;
}

/// Replacement policy selector, used by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Evict the page loaded earliest.
    Fifo,
    /// Evict the page accessed least recently.
    Lru,
    /// Evict the page referenced furthest in the future (needs a trace).
    Optimal,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy),
            PolicyKind::Lru => Box::new(LruPolicy),
            PolicyKind::Optimal => Box::new(OptimalPolicy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reports_algorithm_name() {
        assert_eq!(PolicyKind::Fifo.build().name(), "FIFO");
        assert_eq!(PolicyKind::Lru.build().name(), "LRU");
        assert_eq!(PolicyKind::Optimal.build().name(), "OPT");
    }
}
