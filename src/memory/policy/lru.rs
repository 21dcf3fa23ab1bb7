use super::ReplacementPolicy;
use crate::memory::frame::{Frame, FrameId};
use crate::trace::AccessRequest;

/// Least-recently-used replacement: evict the frame with the smallest
/// `last_access_time`, ties broken by lowest frame index.
#[derive(Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "LRU"
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
            .min_by_key(|f| (f.last_access_time(), f.index()))
            .map(|f| f.index())
    }
}
