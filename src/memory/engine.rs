//! The paging engine.
//!
//! `MemoryManager` owns the frame table, the residency index, the counters,
//! and the replacement policy behind one engine-wide mutex. A handle is
//! cheap to clone, so a simulation driver and a snapshot poller can share
//! the same engine from different threads; every operation appears atomic
//! to both.

use crate::memory::error::{MemoryError, MemoryResult};
use crate::memory::frame::{FrameId, FrameTable, PageNumber, Tick};
use crate::memory::index::ProcessPageIndex;
use crate::memory::policy::ReplacementPolicy;
use crate::memory::snapshot::{LastOperation, MemoryCounters, MemorySnapshot};
use crate::process::{Process, ProcessId};
use crate::trace::AccessRequest;
use log::{debug, info};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Result of one simulated memory access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The page was already resident.
    Hit { frame: FrameId },
    /// The page faulted and was loaded into a free frame.
    Fault { frame: FrameId },
    /// The page faulted and replaced an evicted page.
    FaultReplace {
        frame: FrameId,
        evicted: (ProcessId, PageNumber),
    },
}

impl AccessOutcome {
    /// Frame the requested page now occupies.
    pub fn frame(&self) -> FrameId {
        match self {
            AccessOutcome::Hit { frame }
            | AccessOutcome::Fault { frame }
            | AccessOutcome::FaultReplace { frame, .. } => *frame,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AccessOutcome::Hit { .. })
    }

    pub fn is_fault(&self) -> bool {
        !self.is_hit()
    }
}

/// Where a faulted page will be placed, decided before any state changes.
enum Placement {
    FreeFrame(FrameId),
    Evict(FrameId),
}

struct EngineState {
    table: FrameTable,
    index: ProcessPageIndex,
    counters: MemoryCounters,
    policy: Box<dyn ReplacementPolicy>,
    reference_trace: Vec<AccessRequest>,
    last_operation: Option<LastOperation>,
}

/// The paging engine. Clone the handle to share it across threads.
#[derive(Clone)]
pub struct MemoryManager {
    inner: Arc<Mutex<EngineState>>,
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager").finish_non_exhaustive()
    }
}

impl MemoryManager {
    /// Creates an engine with all frames free.
    pub fn new(total_frames: usize, policy: Box<dyn ReplacementPolicy>) -> MemoryResult<Self> {
        Self::with_reference_trace(total_frames, policy, Vec::new())
    }

    /// Creates an engine that also knows the complete ordered reference
    /// trace, which lookahead policies (OPT) consult during victim
    /// selection. The trace survives `reset()`.
    pub fn with_reference_trace(
        total_frames: usize,
        policy: Box<dyn ReplacementPolicy>,
        reference_trace: Vec<AccessRequest>,
    ) -> MemoryResult<Self> {
        if total_frames == 0 {
            return Err(MemoryError::InvalidFrameCount(total_frames));
        }
        info!(
            "memory manager initialized: {} frames, {} replacement",
            total_frames,
            policy.name()
        );
        Ok(Self {
            inner: Arc::new(Mutex::new(EngineState {
                table: FrameTable::new(total_frames),
                index: ProcessPageIndex::new(),
                counters: MemoryCounters::default(),
                policy,
                reference_trace,
                last_operation: None,
            })),
        })
    }

    /// Handles one memory reference for `process`.
    ///
    /// Advances the simulation clock, classifies the access as a hit or a
    /// fault, loads the page (evicting a victim if no frame is free), and
    /// updates counters and the residency index in one atomic step. On a
    /// fault the process's own fault counter is bumped as well.
    pub fn access(&self, process: &Process, page: PageNumber) -> MemoryResult<AccessOutcome> {
        if process.pid().is_empty() {
            return Err(MemoryError::EmptyProcessId);
        }
        self.inner.lock().access(process, page)
    }

    pub fn is_resident(&self, pid: &ProcessId, page: PageNumber) -> bool {
        self.inner.lock().index.is_resident(pid, page)
    }

    /// Defensive copy of the pages `pid` currently has resident.
    pub fn resident_pages(&self, pid: &ProcessId) -> HashSet<PageNumber> {
        self.inner.lock().index.resident_pages(pid)
    }

    /// Frees every frame owned by `pid` and drops its index entry. Used
    /// when a process terminates. Counters and the clock are unaffected.
    pub fn release_all(&self, pid: &ProcessId) {
        let mut state = self.inner.lock();
        for id in 0..state.table.len() {
            if state.table.frames()[id].owner() == Some(pid) {
                state.table.frame_mut(id).unload();
            }
        }
        state.index.remove_all(pid);
        debug!("released all pages of process {pid}");
    }

    /// Returns the engine to its post-construction state without
    /// reallocating the frame table. The reference trace is kept.
    pub fn reset(&self) {
        let mut state = self.inner.lock();
        state.table.reset();
        state.index.clear();
        state.counters = MemoryCounters::default();
        state.last_operation = None;
        info!("memory manager reset");
    }

    /// Captures an immutable snapshot under the engine mutex, so it never
    /// observes a half-applied access.
    pub fn capture_snapshot(&self) -> MemorySnapshot {
        let state = self.inner.lock();
        MemorySnapshot::capture(
            state.policy.name(),
            state.table.frames(),
            state.table.clock(),
            state.counters,
            state.last_operation.clone(),
        )
    }

    pub fn algorithm(&self) -> &'static str {
        self.inner.lock().policy.name()
    }

    pub fn total_frames(&self) -> usize {
        self.inner.lock().table.len()
    }

    pub fn free_frame_count(&self) -> usize {
        self.inner.lock().table.free_count()
    }

    pub fn clock(&self) -> Tick {
        self.inner.lock().table.clock()
    }

    pub fn counters(&self) -> MemoryCounters {
        self.inner.lock().counters
    }

    pub fn total_accesses(&self) -> u64 {
        self.inner.lock().counters.total_accesses
    }

    pub fn page_faults(&self) -> u64 {
        self.inner.lock().counters.page_faults
    }

    pub fn page_replacements(&self) -> u64 {
        self.inner.lock().counters.page_replacements
    }

    pub fn total_page_loads(&self) -> u64 {
        self.inner.lock().counters.total_page_loads
    }

    pub fn fault_rate(&self) -> f64 {
        self.inner.lock().counters.fault_rate()
    }
}

impl EngineState {
    fn access(&mut self, process: &Process, page: PageNumber) -> MemoryResult<AccessOutcome> {
        let pid = process.pid().clone();

        // Hit: the pair is already resident, only its recency changes.
        if let Some(frame) = self.table.find_resident(&pid, page) {
            let now = self.table.advance_clock();
            self.table.frame_mut(frame).touch(now);
            self.counters.total_accesses += 1;
            self.last_operation = Some(LastOperation {
                page_in_frame: None,
                page_out_frame: None,
                pid: pid.clone(),
                page,
                was_fault: false,
            });
            debug!("hit: {pid}:P{page} in frame {frame} at t={now}");
            return Ok(AccessOutcome::Hit { frame });
        }

        // Fault. Decide the placement before mutating anything, so a
        // misbehaving policy aborts the access with the engine untouched.
        let placement = match self.table.find_free() {
            Some(free) => Placement::FreeFrame(free),
            None => {
                let request = AccessRequest::new(pid.clone(), page);
                let victim = self.policy.select_victim(
                    self.table.frames(),
                    &request,
                    self.lookahead(),
                );
                match victim {
                    Some(id) if id < self.table.len() && self.table.frames()[id].is_occupied() => {
                        Placement::Evict(id)
                    }
                    _ => {
                        return Err(MemoryError::ReplacementFailed {
                            policy: self.policy.name(),
                        })
                    }
                }
            }
        };

        let now = self.table.advance_clock();
        self.counters.total_accesses += 1;
        self.counters.page_faults += 1;
        self.counters.total_page_loads += 1;
        process.record_page_fault();

        let outcome = match placement {
            Placement::FreeFrame(frame) => {
                self.table.frame_mut(frame).load(pid.clone(), page, now);
                self.index.insert(pid.clone(), page);
                self.last_operation = Some(LastOperation {
                    page_in_frame: Some(frame),
                    page_out_frame: None,
                    pid: pid.clone(),
                    page,
                    was_fault: true,
                });
                debug!("fault: {pid}:P{page} loaded into free frame {frame} at t={now}");
                AccessOutcome::Fault { frame }
            }
            Placement::Evict(frame) => {
                self.counters.page_replacements += 1;
                let evicted = self
                    .table
                    .frame_mut(frame)
                    .unload()
                    .unwrap_or_else(|| (pid.clone(), page));
                self.index.remove(&evicted.0, evicted.1);
                self.table.frame_mut(frame).load(pid.clone(), page, now);
                self.index.insert(pid.clone(), page);
                self.last_operation = Some(LastOperation {
                    page_in_frame: Some(frame),
                    page_out_frame: Some(frame),
                    pid: pid.clone(),
                    page,
                    was_fault: true,
                });
                debug!(
                    "replace: {}:P{} evicted from frame {frame} for {pid}:P{page} at t={now}",
                    evicted.0, evicted.1
                );
                AccessOutcome::FaultReplace { frame, evicted }
            }
        };

        Ok(outcome)
    }

    /// Strictly-future suffix of the registered reference trace. The clock
    /// counts one tick per access, so before the current access advances it
    /// the current request sits at `trace[clock]` and everything after it
    /// is lookahead.
    fn lookahead(&self) -> &[AccessRequest] {
        let next = (self.table.clock() as usize + 1).min(self.reference_trace.len());
        &self.reference_trace[next..]
    }
}
