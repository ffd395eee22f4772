use super::*;
use crate::model::tests::{model, score};
use crate::model::AssignmentSolution;

fn solver() -> HeuristicSolver {
    HeuristicSolver::new(&HeuristicConfig::default())
}

#[test]
fn test_construction_prefers_high_scores() {
    // capacity 10 fits one of the two ships
    let m = model(&[10], &[(6, &[(0, 1)]), (6, &[(0, 4)])]);
    let working = construct(&m);
    assert_eq!(working.to_solution().assignment, vec![None, Some(0)]);
    assert_eq!(working.score(), score(4));
}

#[test]
fn test_construction_skips_negative_pairs() {
    let m = model(&[10], &[(1, &[(0, -3)]), (1, &[(0, 0)])]);
    let working = construct(&m);
    assert_eq!(working.to_solution().assignment, vec![None, Some(0)]);
}

#[test]
fn test_ruin_escapes_local_optimum() {
    // Greedy puts ship 1 at dock 0, the only dock ship 0 fits. No single
    // move improves on that; refilling after a ruin places both.
    let m = model(&[10, 10], &[(8, &[(0, 4)]), (8, &[(0, 5), (1, 5)])]);
    let outcome = solver().solve(&m);
    assert_eq!(outcome.solution.score, score(9));
    assert_eq!(outcome.solution.assignment, vec![Some(0), Some(1)]);
    assert!(!outcome.exhaustive);
    assert!(m.verify(&outcome.solution).is_ok());
}

#[test]
fn test_tie_break_prefers_lower_ship() {
    let m = model(&[10], &[(10, &[(0, 3)]), (10, &[(0, 3)])]);
    let outcome = solver().solve(&m);
    assert_eq!(outcome.solution.assignment, vec![Some(0), None]);
}

#[test]
fn test_tie_break_prefers_lower_dock() {
    let m = model(&[10, 10], &[(5, &[(0, 2), (1, 2)])]);
    let outcome = solver().solve(&m);
    assert_eq!(outcome.solution.assignment, vec![Some(0)]);
}

#[test]
fn test_replace_move() {
    let m = model(&[10], &[(10, &[(0, 1)]), (10, &[(0, 2)])]);
    let mut working = Working::empty(&m);
    working.set(&m, 0, Some(0));
    let mut stats = SearchStats::default();
    LocalSearch::new(100).improve(&m, &mut working, &mut stats);
    assert_eq!(working.to_solution().assignment, vec![None, Some(0)]);
    assert!(stats.moves_accepted >= 1);
}

#[test]
fn test_try_apply_rejects_over_capacity() {
    let m = model(&[10], &[(6, &[(0, 1)]), (6, &[(0, 1)])]);
    let mut working = Working::empty(&m);
    assert!(working.try_apply(&m, &[(0, Some(0))]));
    assert!(!working.try_apply(&m, &[(1, Some(0))]));
    assert_eq!(working.score(), score(1));
    assert_eq!(working.to_solution().assignment, vec![Some(0), None]);
}

#[test]
fn test_deterministic_for_seed() {
    let rows: Vec<(i64, Vec<(usize, i64)>)> = (0..12)
        .map(|i| (3 + (i % 4), vec![(0, 10 - i), (1, 5 + (i % 3)), (2, i)]))
        .collect();
    let rows_ref: Vec<(i64, &[(usize, i64)])> = rows.iter().map(|(l, o)| (*l, o.as_slice())).collect();
    let m = model(&[9, 7, 8], &rows_ref);

    let first = solver().solve(&m).solution;
    let second = solver().solve(&m).solution;
    assert_eq!(first, second);
    assert!(m.verify(&first).is_ok());
}

#[test]
fn test_ruin_never_worsens() {
    let m = model(&[10, 10], &[(5, &[(0, 3), (1, 1)]), (5, &[(0, 2)]), (6, &[(0, 4), (1, 4)])]);
    let start = construct(&m).to_solution();
    let mut stats = SearchStats::default();
    let best = RuinAndRecreate::new(7, 20, 0.5).run(&m, start.clone(), &LocalSearch::new(100), &mut stats);
    assert!(best == start || best.is_better_than(&start));
    assert_eq!(stats.ruin_rounds, 20);
}

#[test]
fn test_empty_model() {
    let m = model(&[], &[]);
    let outcome = solver().solve(&m);
    assert_eq!(outcome.solution, AssignmentSolution { assignment: vec![], score: score(0) });
}
