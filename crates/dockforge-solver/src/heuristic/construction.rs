//! Greedy construction.

use std::cmp::Reverse;

use dockforge_core::AllocationScore;

use super::Working;
use crate::model::AssignmentModel;

/// Builds a starting assignment by taking pairs in order of score
/// (descending), then ship, then dock, skipping pairs that no longer fit.
pub(crate) fn construct(model: &AssignmentModel) -> Working {
    let mut working = Working::empty(model);
    fill(model, &mut working, 0..model.ship_count());
    working
}

/// Greedily places the unassigned ships among `ships`.
///
/// Pairs with a negative score are never taken.
pub(crate) fn fill(model: &AssignmentModel, working: &mut Working, ships: impl IntoIterator<Item = usize>) {
    let mut pairs: Vec<(Reverse<AllocationScore>, usize, usize)> = ships
        .into_iter()
        .filter(|&ship| working.choice(ship).is_none())
        .flat_map(|ship| {
            model
                .options(ship)
                .iter()
                .enumerate()
                .filter(|(_, option)| option.score >= AllocationScore::ZERO)
                .map(move |(k, option)| (Reverse(option.score), ship, k))
        })
        .collect();
    pairs.sort_unstable();

    for (_, ship, k) in pairs {
        if working.choice(ship).is_none() && working.fits(model, ship, k) {
            working.set(model, ship, Some(k));
        }
    }
}
