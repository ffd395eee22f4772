//! Mutable assignment state with incremental residuals and score.

use dockforge_core::AllocationScore;

use crate::model::{choice_key, AssignmentModel, AssignmentSolution};

/// A ship's new choice.
pub(crate) type Change = (usize, Option<usize>);

#[derive(Debug, Clone)]
pub(crate) struct Working {
    assignment: Vec<Option<usize>>,
    residual: Vec<i64>,
    score: AllocationScore,
}

impl Working {
    pub(crate) fn empty(model: &AssignmentModel) -> Self {
        Self {
            assignment: vec![None; model.ship_count()],
            residual: model.capacities().to_vec(),
            score: AllocationScore::ZERO,
        }
    }

    pub(crate) fn from_solution(model: &AssignmentModel, solution: &AssignmentSolution) -> Self {
        Self {
            assignment: solution.assignment.clone(),
            residual: model.residuals(&solution.assignment),
            score: solution.score,
        }
    }

    pub(crate) fn to_solution(&self) -> AssignmentSolution {
        AssignmentSolution {
            assignment: self.assignment.clone(),
            score: self.score,
        }
    }

    pub(crate) fn score(&self) -> AllocationScore {
        self.score
    }

    pub(crate) fn choice(&self, ship: usize) -> Option<usize> {
        self.assignment[ship]
    }

    pub(crate) fn assigned_count(&self) -> usize {
        self.assignment.iter().filter(|c| c.is_some()).count()
    }

    /// Dock currently holding `ship`.
    pub(crate) fn dock_of(&self, model: &AssignmentModel, ship: usize) -> Option<usize> {
        self.assignment[ship].map(|k| model.options(ship)[k].dock)
    }

    pub(crate) fn fits(&self, model: &AssignmentModel, ship: usize, option: usize) -> bool {
        model.length(ship) <= self.residual[model.options(ship)[option].dock]
    }

    /// Sets `ship` to `choice` without a capacity check. Returns the
    /// previous choice.
    pub(crate) fn set(&mut self, model: &AssignmentModel, ship: usize, choice: Option<usize>) -> Option<usize> {
        let previous = self.assignment[ship];
        if let Some(k) = previous {
            let option = model.options(ship)[k];
            self.residual[option.dock] += model.length(ship);
            self.score = self.score - option.score;
        }
        if let Some(k) = choice {
            let option = model.options(ship)[k];
            self.residual[option.dock] -= model.length(ship);
            self.score = self.score + option.score;
        }
        self.assignment[ship] = choice;
        previous
    }

    /// Applies `changes` if the result stays within capacity and is
    /// strictly better in (score, tie-break) order. Otherwise leaves the
    /// state untouched. Returns whether the move was applied.
    pub(crate) fn try_apply(&mut self, model: &AssignmentModel, changes: &[Change]) -> bool {
        let Some(&(first_ship, _)) = changes.iter().min_by_key(|(ship, _)| *ship) else {
            return false;
        };
        let before_score = self.score;
        let before_key = choice_key(self.assignment[first_ship]);

        let mut previous: smallvec::SmallVec<[Change; 2]> = smallvec::SmallVec::new();
        for &(ship, choice) in changes {
            previous.push((ship, self.set(model, ship, choice)));
        }

        let feasible = changes.iter().all(|&(ship, _)| {
            self.dock_of(model, ship)
                .map_or(true, |dock| self.residual[dock] >= 0)
        });
        let improved = self.score > before_score
            || (self.score == before_score
                && choice_key(self.assignment[first_ship]) < before_key);

        if feasible && improved {
            return true;
        }
        for &(ship, choice) in previous.iter().rev() {
            self.set(model, ship, choice);
        }
        false
    }
}
