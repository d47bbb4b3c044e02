//! Search budgets shared by every engine.
//!
//! A search is bounded by depth, and optionally by wall-clock time and a node
//! budget. Engines poll the clock every `CHECK_INTERVAL` nodes and unwind with
//! their best result so far once it reports a stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Nodes between two clock reads.
pub const CHECK_INTERVAL: u64 = 256;

/// Limits for a single `Engine::search` call.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in half-moves
    pub depth: u8,
    /// Wall-clock budget (None = unbounded)
    pub move_time: Option<Duration>,
    /// Node budget (None = unbounded)
    pub max_nodes: Option<u64>,
    pub clock: SearchClock,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            max_nodes: None,
            clock: SearchClock::new(None, None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            max_nodes: None,
            clock: SearchClock::new(Some(move_time), None),
        }
    }

    /// Adds a node budget to these limits.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self.clock = SearchClock::new(self.move_time, Some(max_nodes));
        self
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.clock.is_stopped()
    }

    pub fn start(&self) {
        self.clock.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Cloneable stop flag plus the budget it enforces. Clones share the flag,
/// so a caller holding one can cancel a search running on another thread.
#[derive(Debug, Clone)]
pub struct SearchClock {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl SearchClock {
    pub fn new(time_limit: Option<Duration>, node_limit: Option<u64>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            node_limit,
        }
    }

    pub fn start(&self) {
        if let Ok(mut start) = self.start_time.write() {
            *start = Some(Instant::now());
        }
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and node count, raising the stop flag when either
    /// budget is spent. Returns the flag.
    pub fn check(&self, nodes: u64) -> bool {
        if self.is_stopped() {
            return true;
        }
        let over_nodes = self.node_limit.is_some_and(|limit| nodes >= limit);
        let over_time = self.time_limit.is_some_and(|limit| self.elapsed() >= limit);
        if over_nodes || over_time {
            self.stop();
            return true;
        }
        false
    }

    /// Polls `check` once every `CHECK_INTERVAL` nodes, otherwise just reads the flag.
    #[inline]
    pub fn poll(&self, nodes: u64) -> bool {
        if nodes.is_multiple_of(CHECK_INTERVAL) {
            self.check(nodes)
        } else {
            self.is_stopped()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .ok()
            .and_then(|s| *s)
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Time left before the budget runs out (None if unbounded).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for SearchClock {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
