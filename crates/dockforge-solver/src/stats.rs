//! Search statistics.

use std::time::{Duration, Instant};

/// Counters collected by one solver run.
///
/// # Example
///
/// ```
/// use dockforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.nodes_explored, 0);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Branch-and-bound nodes visited.
    pub nodes_explored: u64,
    /// Local search moves evaluated.
    pub moves_evaluated: u64,
    /// Local search moves applied.
    pub moves_accepted: u64,
    /// Ruin-and-recreate rounds run.
    pub ruin_rounds: u32,
    /// Times the incumbent was replaced.
    pub improvements: u32,
}

impl SearchStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    /// Folds the counters of another run into this one.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes_explored += other.nodes_explored;
        self.moves_evaluated += other.moves_evaluated;
        self.moves_accepted += other.moves_accepted;
        self.ruin_rounds += other.ruin_rounds;
        self.improvements += other.improvements;
    }
}
