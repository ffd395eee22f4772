//! First-improvement local search over insert, relocate, swap, replace and
//! eject moves.

use tracing::trace;

use super::Working;
use crate::model::AssignmentModel;
use crate::stats::SearchStats;

/// Deterministic hill climber.
///
/// Each step scans the neighborhood in a fixed order and applies the first
/// move that is strictly better in (score, tie-break) order. Stops at a
/// local optimum or after `step_limit` applied moves.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    step_limit: u64,
}

impl LocalSearch {
    pub fn new(step_limit: u64) -> Self {
        Self { step_limit }
    }

    /// Improves `working` in place. Returns the number of applied moves.
    pub(crate) fn improve(&self, model: &AssignmentModel, working: &mut Working, stats: &mut SearchStats) -> u64 {
        let mut steps = 0;
        while steps < self.step_limit && step(model, working, stats) {
            steps += 1;
        }
        trace!(event = "local_search_end", steps, score = %working.score());
        steps
    }
}

/// Applies the first improving move. Returns false at a local optimum.
fn step(model: &AssignmentModel, working: &mut Working, stats: &mut SearchStats) -> bool {
    let n = model.ship_count();
    let mut attempt = |working: &mut Working, changes: &[(usize, Option<usize>)]| {
        let accepted = working.try_apply(model, changes);
        stats.record_move(accepted);
        accepted
    };

    // insert
    for ship in 0..n {
        if working.choice(ship).is_some() {
            continue;
        }
        for k in 0..model.options(ship).len() {
            if attempt(working, &[(ship, Some(k))]) {
                return true;
            }
        }
    }

    // relocate
    for ship in 0..n {
        let Some(current) = working.choice(ship) else {
            continue;
        };
        for k in 0..model.options(ship).len() {
            if k != current && attempt(working, &[(ship, Some(k))]) {
                return true;
            }
        }
    }

    // swap
    for a in 0..n {
        let Some(dock_a) = working.dock_of(model, a) else {
            continue;
        };
        for b in (a + 1)..n {
            let Some(dock_b) = working.dock_of(model, b) else {
                continue;
            };
            if dock_a == dock_b {
                continue;
            }
            let (Some(ka), Some(kb)) = (model.option_for(a, dock_b), model.option_for(b, dock_a)) else {
                continue;
            };
            if attempt(working, &[(a, Some(ka)), (b, Some(kb))]) {
                return true;
            }
        }
    }

    // replace an assigned ship by an unassigned one at the same dock
    for a in 0..n {
        let Some(dock) = working.dock_of(model, a) else {
            continue;
        };
        for b in 0..n {
            if working.choice(b).is_some() {
                continue;
            }
            let Some(kb) = model.option_for(b, dock) else {
                continue;
            };
            if attempt(working, &[(a, None), (b, Some(kb))]) {
                return true;
            }
        }
    }

    // eject
    for ship in 0..n {
        if working.choice(ship).is_some() && attempt(working, &[(ship, None)]) {
            return true;
        }
    }

    false
}
