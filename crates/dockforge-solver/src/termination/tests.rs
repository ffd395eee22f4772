use std::time::Duration;

use super::*;

fn scope_with_nodes(nodes: u64) -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start();
    for _ in 0..nodes {
        scope.increment_nodes();
    }
    scope
}

#[test]
fn test_node_count() {
    let term = NodeCountTermination::new(3);
    assert!(!term.is_terminated(&scope_with_nodes(2)));
    assert!(term.is_terminated(&scope_with_nodes(3)));
}

#[test]
fn test_time_not_started() {
    let term = TimeTermination::new(Duration::ZERO);
    assert!(!term.is_terminated(&SearchScope::new()));
    assert!(term.is_terminated(&scope_with_nodes(0)));
}

#[test]
fn test_time_generous_limit() {
    let term = TimeTermination::millis(60_000);
    assert!(!term.is_terminated(&scope_with_nodes(0)));
}

#[test]
fn test_or_any_fires() {
    let term = OrTermination::new((TimeTermination::millis(60_000), NodeCountTermination::new(5)));
    assert!(!term.is_terminated(&scope_with_nodes(4)));
    assert!(term.is_terminated(&scope_with_nodes(5)));
}

#[test]
fn test_absent_condition_never_fires() {
    let term: Option<NodeCountTermination> = None;
    assert!(!term.is_terminated(&scope_with_nodes(1_000)));
    assert!(Some(NodeCountTermination::new(1)).is_terminated(&scope_with_nodes(1)));
}
