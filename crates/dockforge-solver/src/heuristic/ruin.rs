//! Seeded ruin-and-recreate perturbation.

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::construction::fill;
use super::{LocalSearch, Working};
use crate::model::{AssignmentModel, AssignmentSolution};
use crate::stats::SearchStats;

/// Releases a random share of the assigned ships from the best solution,
/// refills greedily (other unassigned ships first), repairs with local
/// search, and keeps the result if it is better.
#[derive(Debug, Clone)]
pub struct RuinAndRecreate {
    seed: u64,
    iterations: u32,
    fraction: f64,
}

impl RuinAndRecreate {
    pub fn new(seed: u64, iterations: u32, fraction: f64) -> Self {
        Self {
            seed,
            iterations,
            fraction,
        }
    }

    pub(crate) fn run(
        &self,
        model: &AssignmentModel,
        start: AssignmentSolution,
        local_search: &LocalSearch,
        stats: &mut SearchStats,
    ) -> AssignmentSolution {
        let mut best = start;
        if self.fraction <= 0.0 {
            return best;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        for round in 0..self.iterations {
            let assigned: Vec<usize> = best
                .assignment
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_some())
                .map(|(ship, _)| ship)
                .collect();
            if assigned.is_empty() {
                break;
            }
            let count = ((assigned.len() as f64 * self.fraction).ceil() as usize).clamp(1, assigned.len());

            let mut working = Working::from_solution(model, &best);
            let mut ruined: Vec<usize> = index::sample(&mut rng, assigned.len(), count)
                .into_iter()
                .map(|i| assigned[i])
                .collect();
            ruined.sort_unstable();
            for &ship in &ruined {
                working.set(model, ship, None);
            }

            let others: Vec<usize> = (0..model.ship_count())
                .filter(|ship| ruined.binary_search(ship).is_err())
                .collect();
            fill(model, &mut working, others);
            fill(model, &mut working, ruined.iter().copied());
            local_search.improve(model, &mut working, stats);
            stats.ruin_rounds += 1;

            let candidate = working.to_solution();
            if candidate.is_better_than(&best) {
                debug!(event = "ruin_improved", round, score = %candidate.score);
                stats.record_improvement();
                best = candidate;
            }
        }
        best
    }
}
