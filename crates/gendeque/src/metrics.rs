//! Cumulative container counters.
//!
//! [`DequeStats`] records how often a container relocated its storage and
//! how its generation tracker handled each mutation. Useful for verifying
//! amortized growth and for spotting code that holds cursors across hot
//! mutation loops (every such mutation costs a retirement).

/// Counters accumulated over a container's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DequeStats {
    /// Number of growth steps that moved every element to a new block.
    pub reallocations: u64,
    /// Number of mutations that retired a generation held by cursors.
    pub retirements: u64,
    /// Number of mutations that bumped an unreferenced generation in place.
    pub in_place_bumps: u64,
    /// Largest capacity the container has had.
    pub peak_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = DequeStats::default();
        assert_eq!(s.reallocations, 0);
        assert_eq!(s.retirements, 0);
        assert_eq!(s.in_place_bumps, 0);
        assert_eq!(s.peak_capacity, 0);
    }
}
