use super::ReplacementPolicy;
use crate::memory::frame::{Frame, FrameId};
use crate::trace::AccessRequest;
use std::cmp::Reverse;

/// Belady's optimal replacement: evict the resident page whose next
/// reference lies furthest in the forward trace. A page never referenced
/// again beats any page that is, regardless of distance; ties break by
/// lowest frame index.
///
/// This is a lookahead oracle: the engine passes the strictly-future suffix
/// of the reference trace the driver registered up front. With an empty
/// lookahead every resident page counts as never referenced again, so the
/// lowest-index occupied frame is evicted.
#[derive(Debug, Default)]
pub struct OptimalPolicy;

impl OptimalPolicy {
    /// Position of the frame's resident page in the forward trace, or
    /// `None` if it is never referenced again.
    fn next_use(frame: &Frame, lookahead: &[AccessRequest]) -> Option<usize> {
        let (owner, page) = (frame.owner()?, frame.page()?);
        lookahead
            .iter()
            .position(|req| req.pid() == owner && req.page() == page)
    }
}

impl ReplacementPolicy for OptimalPolicy {
    fn name(&self) -> &'static str {
        "OPT"
    }

    fn select_victim(
        &self,
        frames: &[Frame],
        _request: &AccessRequest,
        lookahead: &[AccessRequest],
    ) -> Option<FrameId> {
        frames
            .iter()
            .filter(|f| f.is_occupied())
            .max_by_key(|f| {
                let distance = Self::next_use(f, lookahead).map_or(u64::MAX, |d| d as u64);
                (distance, Reverse(f.index()))
            })
            .map(|f| f.index())
    }
}
