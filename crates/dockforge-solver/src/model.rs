//! Assignment model handed to the solvers.
//!
//! Ships are candidate positions in ascending id order; docks are
//! operational dock positions in ascending id order. Each ship carries its
//! eligible options sorted by dock, so comparing option indices of one ship
//! compares dock ids.

use std::cmp::Ordering;

use dockforge_core::{AllocationScore, DockforgeError};
use smallvec::SmallVec;

/// One eligible dock for a ship, with the pair score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOption {
    pub dock: usize,
    pub score: AllocationScore,
}

pub type Options = SmallVec<[PairOption; 4]>;

/// Generalized assignment instance: docks are knapsacks with a length
/// budget, ships are items placed in at most one eligible dock.
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    lengths: Vec<i64>,
    capacities: Vec<i64>,
    options: Vec<Options>,
}

impl AssignmentModel {
    /// Builds a model.
    ///
    /// # Errors
    ///
    /// Returns [`DockforgeError::Internal`] if options are not sorted by
    /// dock, reference a missing dock, or if the best or worst total score
    /// would overflow.
    pub fn new(
        lengths: Vec<i64>,
        capacities: Vec<i64>,
        options: Vec<Options>,
    ) -> Result<Self, DockforgeError> {
        if lengths.len() != options.len() {
            return Err(DockforgeError::Internal(format!(
                "{} ship lengths for {} option lists",
                lengths.len(),
                options.len()
            )));
        }

        let mut upper = AllocationScore::ZERO;
        let mut lower = AllocationScore::ZERO;
        for (ship, opts) in options.iter().enumerate() {
            if opts.windows(2).any(|w| w[0].dock >= w[1].dock) {
                return Err(DockforgeError::Internal(format!(
                    "options of ship {ship} are not sorted by dock"
                )));
            }
            if opts.iter().any(|o| o.dock >= capacities.len()) {
                return Err(DockforgeError::Internal(format!(
                    "ship {ship} references a missing dock"
                )));
            }
            let best = opts.iter().map(|o| o.score).max().unwrap_or_default();
            let worst = opts.iter().map(|o| o.score).min().unwrap_or_default();
            upper = best
                .max(AllocationScore::ZERO)
                .checked_add(upper)
                .ok_or_else(|| DockforgeError::Internal("objective overflow".into()))?;
            lower = worst
                .min(AllocationScore::ZERO)
                .checked_add(lower)
                .ok_or_else(|| DockforgeError::Internal("objective overflow".into()))?;
        }

        Ok(Self {
            lengths,
            capacities,
            options,
        })
    }

    pub fn ship_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn dock_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn length(&self, ship: usize) -> i64 {
        self.lengths[ship]
    }

    pub fn capacities(&self) -> &[i64] {
        &self.capacities
    }

    pub fn options(&self, ship: usize) -> &[PairOption] {
        &self.options[ship]
    }

    pub fn pair_count(&self) -> usize {
        self.options.iter().map(SmallVec::len).sum()
    }

    /// Option index of `dock` for `ship`, if eligible.
    pub fn option_for(&self, ship: usize, dock: usize) -> Option<usize> {
        self.options[ship].binary_search_by_key(&dock, |o| o.dock).ok()
    }

    /// The all-unassigned solution.
    pub fn empty_solution(&self) -> AssignmentSolution {
        AssignmentSolution {
            assignment: vec![None; self.ship_count()],
            score: AllocationScore::ZERO,
        }
    }

    /// Remaining capacity per dock under `assignment`.
    pub fn residuals(&self, assignment: &[Option<usize>]) -> Vec<i64> {
        let mut residual = self.capacities.clone();
        for (ship, choice) in assignment.iter().enumerate() {
            if let Some(k) = choice {
                residual[self.options[ship][*k].dock] -= self.lengths[ship];
            }
        }
        residual
    }

    /// Total score of `assignment`.
    pub fn evaluate(&self, assignment: &[Option<usize>]) -> AllocationScore {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(ship, choice)| choice.map(|k| self.options[ship][k].score))
            .sum()
    }

    /// Checks that `solution` is well-formed, within capacity, and
    /// carries the right score.
    pub fn verify(&self, solution: &AssignmentSolution) -> Result<(), DockforgeError> {
        if solution.assignment.len() != self.ship_count() {
            return Err(DockforgeError::Internal(
                "solution does not cover every ship".into(),
            ));
        }
        for (ship, choice) in solution.assignment.iter().enumerate() {
            if let Some(k) = choice {
                if *k >= self.options[ship].len() {
                    return Err(DockforgeError::Internal(format!(
                        "ship {ship} assigned to ineligible option {k}"
                    )));
                }
            }
        }
        if let Some(dock) = self.residuals(&solution.assignment).iter().position(|r| *r < 0) {
            return Err(DockforgeError::Internal(format!(
                "dock {dock} over capacity"
            )));
        }
        let score = self.evaluate(&solution.assignment);
        if score != solution.score {
            return Err(DockforgeError::Internal(format!(
                "solution score {} does not match evaluated {}",
                solution.score, score
            )));
        }
        Ok(())
    }
}

/// A (possibly partial) assignment: per ship, an option index or `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSolution {
    pub assignment: Vec<Option<usize>>,
    pub score: AllocationScore,
}

impl AssignmentSolution {
    /// Tie-break order between equal-score solutions.
    ///
    /// Lexicographic over ships; per ship a lower option index (lower dock id)
    /// sorts first and unassigned sorts last.
    pub fn tie_break_cmp(&self, other: &Self) -> Ordering {
        self.assignment
            .iter()
            .map(|c| choice_key(*c))
            .cmp(other.assignment.iter().map(|c| choice_key(*c)))
    }

    /// Higher score, or equal score and earlier in tie-break order.
    pub fn is_better_than(&self, other: &Self) -> bool {
        match self.score.cmp(&other.score) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.tie_break_cmp(other) == Ordering::Less,
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.assignment.iter().filter(|c| c.is_some()).count()
    }
}

/// Sort key of a single ship's choice.
#[inline]
pub fn choice_key(choice: Option<usize>) -> usize {
    choice.unwrap_or(usize::MAX)
}
