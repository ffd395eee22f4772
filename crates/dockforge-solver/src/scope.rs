//! Search scope shared between a solver and its termination conditions.

use std::time::{Duration, Instant};

/// Progress of a running search.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Option<Instant>,
    nodes_explored: u64,
}

impl SearchScope {
    pub fn new() -> Self {
        Self {
            start_time: None,
            nodes_explored: 0,
        }
    }

    /// Marks the start of the search. Elapsed time counts from here.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.nodes_explored = 0;
    }

    /// Returns the elapsed time since [`start`](Self::start), if started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    pub fn increment_nodes(&mut self) {
        self.nodes_explored += 1;
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
