//! Immutable point-in-time views of the paging engine.
//!
//! Snapshots are captured under the same mutex as mutations and are fully
//! owned copies: a poller can hold one for as long as it likes without
//! touching engine state, and will never observe a half-applied access.

use crate::memory::frame::{Frame, FrameId, PageNumber, Tick};
use crate::process::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display status of one frame, relative to the most recent access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    /// Frame is free.
    Empty,
    /// Frame holds a page untouched by the last access.
    Loaded,
    /// Frame received a page on the last access, from a free frame.
    PageIn,
    /// Frame had its occupant evicted and replaced on the last access.
    Replaced,
}

/// Copy of one frame's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub index: FrameId,
    pub owner: Option<ProcessId>,
    pub page: Option<PageNumber>,
    pub load_time: Tick,
    pub last_access_time: Tick,
    pub status: FrameStatus,
}

impl fmt::Display for FrameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.owner, self.page) {
            (Some(owner), Some(page)) => write!(f, "[{owner}:P{page}]"),
            _ => f.write_str("[FREE]"),
        }
    }
}

/// The four monotonic paging counters.
///
/// `total_accesses == hits + page_faults` and `total_page_loads ==
/// page_faults` hold at every instant; `page_replacements` counts the
/// faults that also required an eviction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCounters {
    pub total_accesses: u64,
    pub page_faults: u64,
    pub page_replacements: u64,
    pub total_page_loads: u64,
}

impl MemoryCounters {
    pub fn hits(&self) -> u64 {
        self.total_accesses - self.page_faults
    }

    /// Faults per page load. Zero before any load has happened.
    pub fn fault_rate(&self) -> f64 {
        if self.total_page_loads == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.total_page_loads as f64
        }
    }
}

/// What the most recent access did, for visualizers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastOperation {
    /// Frame that received a page, if the access faulted.
    pub page_in_frame: Option<FrameId>,
    /// Frame whose occupant was evicted, if the access replaced a page.
    pub page_out_frame: Option<FrameId>,
    pub pid: ProcessId,
    pub page: PageNumber,
    pub was_fault: bool,
}

/// Immutable copy of the whole engine state at one instant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub algorithm: String,
    pub total_frames: usize,
    pub clock: Tick,
    pub frames: Vec<FrameSnapshot>,
    pub counters: MemoryCounters,
    pub last_operation: Option<LastOperation>,
}

impl MemorySnapshot {
    pub(crate) fn capture(
        algorithm: &str,
        frames: &[Frame],
        clock: Tick,
        counters: MemoryCounters,
        last_operation: Option<LastOperation>,
    ) -> Self {
        let frames: Vec<FrameSnapshot> = frames
            .iter()
            .map(|frame| {
                let status = if !frame.is_occupied() {
                    FrameStatus::Empty
                } else {
                    match &last_operation {
                        Some(op) if op.page_out_frame == Some(frame.index()) => {
                            FrameStatus::Replaced
                        }
                        Some(op) if op.page_in_frame == Some(frame.index()) => FrameStatus::PageIn,
                        _ => FrameStatus::Loaded,
                    }
                };
                FrameSnapshot {
                    index: frame.index(),
                    owner: frame.owner().cloned(),
                    page: frame.page(),
                    load_time: frame.load_time(),
                    last_access_time: frame.last_access_time(),
                    status,
                }
            })
            .collect();

        Self {
            algorithm: algorithm.to_string(),
            total_frames: frames.len(),
            clock,
            frames,
            counters,
            last_operation,
        }
    }

    pub fn free_frame_count(&self) -> usize {
        self.frames.iter().filter(|f| f.owner.is_none()).count()
    }

    pub fn fault_rate(&self) -> f64 {
        self.counters.fault_rate()
    }
}

impl fmt::Display for MemorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory state ({}):", self.algorithm)?;
        for frame in &self.frames {
            writeln!(f, "  Frame {:2}: {}", frame.index, frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_rate_zero_without_loads() {
        let counters = MemoryCounters::default();
        assert_eq!(counters.fault_rate(), 0.0);
    }

    #[test]
    fn test_fault_rate() {
        let counters = MemoryCounters {
            total_accesses: 10,
            page_faults: 4,
            page_replacements: 1,
            total_page_loads: 4,
        };
        assert_eq!(counters.fault_rate(), 1.0);
        assert_eq!(counters.hits(), 6);
    }

    #[test]
    fn test_frame_snapshot_display() {
        let occupied = FrameSnapshot {
            index: 0,
            owner: Some(ProcessId::from("P1")),
            page: Some(3),
            load_time: 1,
            last_access_time: 2,
            status: FrameStatus::Loaded,
        };
        assert_eq!(occupied.to_string(), "[P1:P3]");

        let free = FrameSnapshot {
            index: 1,
            owner: None,
            page: None,
            load_time: 0,
            last_access_time: 0,
            status: FrameStatus::Empty,
        };
        assert_eq!(free.to_string(), "[FREE]");
    }
}
