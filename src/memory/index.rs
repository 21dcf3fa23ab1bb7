//! Inverse residency index: process id to resident page set.

use crate::memory::frame::PageNumber;
use crate::process::ProcessId;
use std::collections::{HashMap, HashSet};

/// Tracks which pages each process currently has resident.
///
/// Kept in lockstep with the frame table by the engine: a page appears here
/// for a pid iff exactly one frame holds that `(pid, page)` pair.
#[derive(Debug, Default)]
pub struct ProcessPageIndex {
    pages: HashMap<ProcessId, HashSet<PageNumber>>,
}

impl ProcessPageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resident(&self, pid: &ProcessId, page: PageNumber) -> bool {
        self.pages.get(pid).is_some_and(|set| set.contains(&page))
    }

    /// Defensive copy of a process's resident page set.
    pub fn resident_pages(&self, pid: &ProcessId) -> HashSet<PageNumber> {
        self.pages.get(pid).cloned().unwrap_or_default()
    }

    /// Total number of resident pages across all processes.
    pub fn resident_count(&self) -> usize {
        self.pages.values().map(HashSet::len).sum()
    }

    pub(crate) fn insert(&mut self, pid: ProcessId, page: PageNumber) {
        self.pages.entry(pid).or_default().insert(page);
    }

    pub(crate) fn remove(&mut self, pid: &ProcessId, page: PageNumber) {
        if let Some(set) = self.pages.get_mut(pid) {
            set.remove(&page);
            if set.is_empty() {
                self.pages.remove(pid);
            }
        }
    }

    /// Drops the pid's entry entirely. Returns the pages it had resident.
    pub(crate) fn remove_all(&mut self, pid: &ProcessId) -> HashSet<PageNumber> {
        self.pages.remove(pid).unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.pages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProcessId {
        ProcessId::from(s)
    }

    #[test]
    fn test_insert_and_query() {
        let mut index = ProcessPageIndex::new();
        index.insert(pid("P1"), 0);
        index.insert(pid("P1"), 1);
        index.insert(pid("P2"), 0);

        assert!(index.is_resident(&pid("P1"), 0));
        assert!(index.is_resident(&pid("P2"), 0));
        assert!(!index.is_resident(&pid("P1"), 2));
        assert!(!index.is_resident(&pid("P3"), 0));
        assert_eq!(index.resident_count(), 3);
    }

    #[test]
    fn test_resident_pages_is_a_copy() {
        let mut index = ProcessPageIndex::new();
        index.insert(pid("P1"), 0);

        let mut copy = index.resident_pages(&pid("P1"));
        copy.insert(99);

        assert!(!index.is_resident(&pid("P1"), 99));
        assert_eq!(index.resident_count(), 1);
    }

    #[test]
    fn test_remove_drops_empty_entries() {
        let mut index = ProcessPageIndex::new();
        index.insert(pid("P1"), 0);
        index.remove(&pid("P1"), 0);

        assert!(!index.is_resident(&pid("P1"), 0));
        assert!(index.resident_pages(&pid("P1")).is_empty());
        assert_eq!(index.resident_count(), 0);
    }

    #[test]
    fn test_remove_all() {
        let mut index = ProcessPageIndex::new();
        index.insert(pid("P1"), 0);
        index.insert(pid("P1"), 1);
        index.insert(pid("P2"), 5);

        let released = index.remove_all(&pid("P1"));
        assert_eq!(released, HashSet::from([0, 1]));
        assert_eq!(index.resident_count(), 1);
        assert!(index.is_resident(&pid("P2"), 5));
    }
}
