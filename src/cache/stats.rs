use serde::Serialize;

use crate::base::AccessState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub read_hits: u64,
    pub read_misses: u64,
    pub write_hits: u64,
    pub write_misses: u64,
    pub fills: u64,
    pub evictions: u64,
    pub invalidations: u64,
}

impl LevelStats {
    /// Counts one classified access. `NA` is not charged to the level.
    pub fn record(&mut self, state: AccessState) {
        let counter = match state {
            AccessState::NA => return,
            AccessState::RH => &mut self.read_hits,
            AccessState::RM => &mut self.read_misses,
            AccessState::WH => &mut self.write_hits,
            AccessState::WM => &mut self.write_misses,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn record_fill(&mut self, evicted: bool) {
        self.fills = self.fills.saturating_add(1);
        if evicted {
            self.evictions = self.evictions.saturating_add(1);
        }
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations = self.invalidations.saturating_add(1);
    }

    pub fn hits(&self) -> u64 {
        self.read_hits + self.write_hits
    }

    pub fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    pub fn accesses(&self) -> u64 {
        self.hits() + self.misses()
    }

    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.hits() as f64 / n as f64,
        }
    }
}

/// Observational counters for a whole run; never fed back into the
/// simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub accesses: u64,
    /// L1 victims that were moved into L2.
    pub writebacks: u64,
    pub l1: LevelStats,
    pub l2: LevelStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_is_not_charged() {
        let mut stats = LevelStats::default();
        stats.record(AccessState::NA);
        assert_eq!(stats.accesses(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_counts_reads_and_writes() {
        let mut stats = LevelStats::default();
        stats.record(AccessState::RH);
        stats.record(AccessState::WH);
        stats.record(AccessState::RM);
        stats.record(AccessState::WM);
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 2);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn fills_count_evictions_only_when_displacing() {
        let mut stats = LevelStats::default();
        stats.record_fill(false);
        stats.record_fill(true);
        stats.record_invalidation();
        assert_eq!(stats.fills, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.invalidations, 1);
    }
}
