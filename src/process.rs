//! The simulated process collaborator.
//!
//! The paging engine does not own processes; the scheduler/driver does. The
//! engine only needs a stable identifier and a place to record that a given
//! process experienced a page fault.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identifier of a simulated process.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ProcessId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A simulated process as seen by the paging engine.
///
/// Keeps its own page-fault count, bumped by the engine on every fault, so
/// the driver can report per-process fault totals.
#[derive(Debug)]
pub struct Process {
    pid: ProcessId,
    page_faults: AtomicU64,
}

impl Process {
    pub fn new(pid: impl Into<ProcessId>) -> Self {
        Self {
            pid: pid.into(),
            page_faults: AtomicU64::new(0),
        }
    }

    pub fn pid(&self) -> &ProcessId {
        &self.pid
    }

    pub fn record_page_fault(&self) {
        self.page_faults.fetch_add(1, Ordering::SeqCst);
    }

    pub fn page_fault_count(&self) -> u64 {
        self.page_faults.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_counting() {
        let process = Process::new("P1");
        assert_eq!(process.page_fault_count(), 0);

        process.record_page_fault();
        process.record_page_fault();
        assert_eq!(process.page_fault_count(), 2);
        assert_eq!(process.pid().as_str(), "P1");
    }

    #[test]
    fn test_process_id_display() {
        let pid = ProcessId::from("worker-3");
        assert_eq!(pid.to_string(), "worker-3");
        assert!(!pid.is_empty());
        assert!(ProcessId::from("").is_empty());
    }
}
