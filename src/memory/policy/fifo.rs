use super::ReplacementPolicy;
use crate::memory::frame::{Frame, FrameId};
use crate::trace::AccessRequest;

/// First-in-first-out replacement: evict the frame with the smallest
/// `load_time`, ties broken by lowest frame index.
#[derive(Debug, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select_victim(
        &self,
        frames: &[Frame],
        _request: &AccessRequest,
        _lookahead: &[AccessRequest],
    ) -> Option<FrameId> {
        frames
            .iter()
            .filter(|f| f.is_occupied())
            .min_by_key(|f| (f.load_time(), f.index()))
            .map(|f| f.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::frame::FrameTable;
    use crate::process::ProcessId;

    fn request() -> AccessRequest {
        AccessRequest::new("P9", 99)
    }

    #[test]
    fn test_evicts_earliest_load() {
        let mut table = FrameTable::new(3);
        for (frame, page) in [(1, 10), (0, 20), (2, 30)] {
            let now = table.advance_clock();
            table.frame_mut(frame).load(ProcessId::from("P1"), page, now);
        }

        let policy = FifoPolicy;
        let victim = policy.select_victim(table.frames(), &request(), &[]);
        assert_eq!(victim, Some(1));
    }

    #[test]
    fn test_ties_break_by_lowest_index() {
        let mut table = FrameTable::new(3);
        let now = table.advance_clock();
        table.frame_mut(0).load(ProcessId::from("P1"), 0, now);
        table.frame_mut(1).load(ProcessId::from("P1"), 1, now);
        table.frame_mut(2).load(ProcessId::from("P1"), 2, now);

        let policy = FifoPolicy;
        let victim = policy.select_victim(table.frames(), &request(), &[]);
        assert_eq!(victim, Some(0));
    }

    #[test]
    fn test_no_occupied_frames() {
        let table = FrameTable::new(2);
        let policy = FifoPolicy;
        assert_eq!(policy.select_victim(table.frames(), &request(), &[]), None);
    }
}
