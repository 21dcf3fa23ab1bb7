//! Virtual-memory paging engine.
//!
//! This module simulates a fixed set of physical frames shared by multiple
//! simulated processes. Key components:
//!
//! - **FrameTable**: Fixed array of frame slots plus the simulation clock
//! - **ProcessPageIndex**: Inverse map from process id to its resident pages
//! - **ReplacementPolicy**: Pluggable victim selection (FIFO, LRU, OPT)
//! - **MemoryManager**: Orchestrates one access per simulated tick and keeps
//!   frame table, index, and counters mutually consistent
//! - **MemorySnapshot**: Immutable point-in-time view for external pollers
//!
//! All mutating and snapshot-reading operations run under one engine-wide
//! mutex, so every access appears atomic to any observer.

pub mod engine;
pub mod error;
pub mod frame;
pub mod index;
pub mod policy;
pub mod snapshot;

pub use engine::{AccessOutcome, MemoryManager};
pub use error::{MemoryError, MemoryResult};
pub use frame::{Frame, FrameId, FrameTable, PageNumber};
pub use index::ProcessPageIndex;
pub use policy::{PolicyKind, ReplacementPolicy};
pub use snapshot::{FrameSnapshot, FrameStatus, MemoryCounters, MemorySnapshot};
