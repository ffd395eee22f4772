//! Node-count-based termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once a number of search nodes has been explored.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.nodes_explored() >= self.limit
    }
}
