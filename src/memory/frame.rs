//! Physical frame slots and the frame table.

use crate::process::ProcessId;

/// Stable position of a frame in the frame table.
pub type FrameId = usize;

/// A page number within a process's address space.
pub type PageNumber = u32;

/// Logical simulation clock value.
pub type Tick = u64;

/// One physical memory slot, holding at most one page.
#[derive(Debug, Clone)]
pub struct Frame {
    index: FrameId,
    occupant: Option<(ProcessId, PageNumber)>,
    load_time: Tick,
    last_access_time: Tick,
}

impl Frame {
    fn new(index: FrameId) -> Self {
        Self {
            index,
            occupant: None,
            load_time: 0,
            last_access_time: 0,
        }
    }

    pub fn index(&self) -> FrameId {
        self.index
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Resident process, or `None` when the frame is free.
    pub fn owner(&self) -> Option<&ProcessId> {
        self.occupant.as_ref().map(|(pid, _)| pid)
    }

    /// Resident page number, or `None` when the frame is free.
    pub fn page(&self) -> Option<PageNumber> {
        self.occupant.as_ref().map(|&(_, page)| page)
    }

    pub fn load_time(&self) -> Tick {
        self.load_time
    }

    pub fn last_access_time(&self) -> Tick {
        self.last_access_time
    }

    pub fn holds(&self, pid: &ProcessId, page: PageNumber) -> bool {
        self.occupant
            .as_ref()
            .is_some_and(|(owner, resident)| owner == pid && *resident == page)
    }

    pub(crate) fn load(&mut self, pid: ProcessId, page: PageNumber, now: Tick) {
        self.occupant = Some((pid, page));
        self.load_time = now;
        self.last_access_time = now;
    }

    pub(crate) fn unload(&mut self) -> Option<(ProcessId, PageNumber)> {
        self.load_time = 0;
        self.last_access_time = 0;
        self.occupant.take()
    }

    pub(crate) fn touch(&mut self, now: Tick) {
        self.last_access_time = now;
    }
}

/// Fixed-size table of frames plus the simulation clock.
///
/// The clock advances exactly once per access request, hit or fault, and is
/// the source of every frame's `load_time` / `last_access_time`.
#[derive(Debug)]
pub struct FrameTable {
    frames: Vec<Frame>,
    clock: Tick,
}

impl FrameTable {
    pub fn new(total_frames: usize) -> Self {
        Self {
            frames: (0..total_frames).map(Frame::new).collect(),
            clock: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub(crate) fn advance_clock(&mut self) -> Tick {
        self.clock += 1;
        self.clock
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn frame_mut(&mut self, id: FrameId) -> &mut Frame {
        &mut self.frames[id]
    }

    /// First free frame by ascending index, if any.
    pub fn find_free(&self) -> Option<FrameId> {
        self.frames.iter().position(|f| !f.is_occupied())
    }

    /// Frame currently holding `(pid, page)`, if resident.
    pub fn find_resident(&self, pid: &ProcessId, page: PageNumber) -> Option<FrameId> {
        self.frames.iter().position(|f| f.holds(pid, page))
    }

    pub fn free_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_occupied()).count()
    }

    /// Returns every frame to its post-construction state. The table is not
    /// reallocated and the clock restarts at zero.
    pub(crate) fn reset(&mut self) {
        for frame in &mut self.frames {
            frame.unload();
        }
        self.clock = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProcessId {
        ProcessId::from(s)
    }

    #[test]
    fn test_new_table_all_free() {
        let table = FrameTable::new(4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.free_count(), 4);
        assert_eq!(table.clock(), 0);
        assert_eq!(table.find_free(), Some(0));
    }

    #[test]
    fn test_load_and_unload() {
        let mut table = FrameTable::new(2);
        let now = table.advance_clock();
        table.frame_mut(1).load(pid("P1"), 7, now);

        let frame = &table.frames()[1];
        assert!(frame.is_occupied());
        assert_eq!(frame.owner(), Some(&pid("P1")));
        assert_eq!(frame.page(), Some(7));
        assert_eq!(frame.load_time(), 1);
        assert_eq!(table.find_free(), Some(0));
        assert_eq!(table.find_resident(&pid("P1"), 7), Some(1));

        let evicted = table.frame_mut(1).unload();
        assert_eq!(evicted, Some((pid("P1"), 7)));
        assert!(!table.frames()[1].is_occupied());
        assert_eq!(table.frames()[1].owner(), None);
    }

    #[test]
    fn test_touch_updates_access_time_only() {
        let mut table = FrameTable::new(1);
        let now = table.advance_clock();
        table.frame_mut(0).load(pid("P1"), 0, now);

        let later = table.advance_clock();
        table.frame_mut(0).touch(later);

        let frame = &table.frames()[0];
        assert_eq!(frame.load_time(), 1);
        assert_eq!(frame.last_access_time(), 2);
    }

    #[test]
    fn test_find_free_is_first_fit() {
        let mut table = FrameTable::new(3);
        let now = table.advance_clock();
        table.frame_mut(0).load(pid("P1"), 0, now);
        table.frame_mut(2).load(pid("P1"), 2, now);
        assert_eq!(table.find_free(), Some(1));
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut table = FrameTable::new(3);
        let now = table.advance_clock();
        table.frame_mut(0).load(pid("P1"), 0, now);

        table.reset();
        assert_eq!(table.len(), 3);
        assert_eq!(table.free_count(), 3);
        assert_eq!(table.clock(), 0);
    }
}
