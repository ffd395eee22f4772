//! Allocation id minting.

use dockforge_core::{AllocationId, DockId, ShipId};

/// Produces ids for new allocations.
///
/// Implemented for closures, so a caller can plug in its own scheme:
///
/// ```
/// use dockforge_core::{AllocationId, DockId, ShipId};
/// use dockforge_solver::AllocationIdGenerator;
///
/// let mut ids = |ship: &ShipId, dock: &DockId| AllocationId::new(format!("{dock}/{ship}"));
/// assert_eq!(ids.next_id(&"s1".into(), &"d1".into()).as_str(), "d1/s1");
/// ```
pub trait AllocationIdGenerator {
    fn next_id(&mut self, ship: &ShipId, dock: &DockId) -> AllocationId;
}

impl<F> AllocationIdGenerator for F
where
    F: FnMut(&ShipId, &DockId) -> AllocationId,
{
    fn next_id(&mut self, ship: &ShipId, dock: &DockId) -> AllocationId {
        self(ship, dock)
    }
}

/// Yields `alloc_{ship}_{dock}_{n}` with `n` counting from 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    issued: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl AllocationIdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, ship: &ShipId, dock: &DockId) -> AllocationId {
        self.issued += 1;
        AllocationId::new(format!("alloc_{ship}_{dock}_{}", self.issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential() {
        let mut ids = SequentialIdGenerator::new();
        let ship = ShipId::from("s1");
        assert_eq!(ids.next_id(&ship, &DockId::from("d1")).as_str(), "alloc_s1_d1_1");
        assert_eq!(ids.next_id(&ship, &DockId::from("d2")).as_str(), "alloc_s1_d2_2");
        assert_eq!(ids.issued(), 2);
    }
}
