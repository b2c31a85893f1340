use log::{debug, trace};

use crate::base::{AccessRecord, AccessResult, AccessState, AccessType};
use crate::cache::config::{HierarchyConfig, InclusionPolicy};
use crate::cache::geometry::DecodedAddr;
use crate::cache::level::CacheLevel;
use crate::cache::stats::HierarchyStats;
use crate::error::SimResult;

/// Two-level hierarchy and the policy state machine that evolves it.
///
/// Each access is classified and fully applied before the call returns, so
/// the next access observes every fill, eviction and write-back of the
/// previous one.
///
/// | access | L1   | L2   | result     | exclusive                          | non-inclusive          |
/// |--------|------|------|------------|------------------------------------|------------------------|
/// | read   | hit  | -    | `(RH, NA)` | -                                  | -                      |
/// | read   | miss | hit  | `(RM, RH)` | move to L1, write L1 victim to L2  | copy to L1, drop victim|
/// | read   | miss | miss | `(RM, RM)` | fill L1 only                       | fill L1 and L2         |
/// | write  | hit  | -    | `(WH, NA)` | -                                  | -                      |
/// | write  | miss | hit  | `(WM, WH)` | -                                  | -                      |
/// | write  | miss | miss | `(WM, WM)` | no allocate                        | no allocate            |
#[derive(Debug, Clone)]
pub struct InclusionController {
    policy: InclusionPolicy,
    l1: CacheLevel,
    l2: CacheLevel,
    accesses: u64,
    writebacks: u64,
}

impl InclusionController {
    /// Builds both levels. Any geometry error surfaces here, before a single
    /// access can be applied.
    pub fn new(config: &HierarchyConfig, policy: InclusionPolicy) -> SimResult<Self> {
        let l1 = CacheLevel::new("L1", &config.l1)?;
        let l2 = CacheLevel::new("L2", &config.l2)?;
        debug!(
            "hierarchy ({policy}): L1 {} sets x {} ways x {}B, L2 {} sets x {} ways x {}B",
            l1.geometry().num_sets(),
            l1.geometry().ways(),
            l1.geometry().block_size(),
            l2.geometry().num_sets(),
            l2.geometry().ways(),
            l2.geometry().block_size(),
        );
        Ok(Self {
            policy,
            l1,
            l2,
            accesses: 0,
            writebacks: 0,
        })
    }

    pub fn policy(&self) -> InclusionPolicy {
        self.policy
    }

    pub fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    pub fn l2(&self) -> &CacheLevel {
        &self.l2
    }

    #[cfg(test)]
    pub(crate) fn l2_mut(&mut self) -> &mut CacheLevel {
        &mut self.l2
    }

    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            accesses: self.accesses,
            writebacks: self.writebacks,
            l1: *self.l1.stats(),
            l2: *self.l2.stats(),
        }
    }

    pub fn access(&mut self, record: &AccessRecord) -> AccessResult {
        let l1_addr = self.l1.decode(record.addr);
        let l2_addr = self.l2.decode(record.addr);

        // L2 is looked up every time, but only charged when L1 misses.
        let l1_hit = self.l1.find(&l1_addr).is_some();
        let l2_way = self.l2.find(&l2_addr);

        let result = match (record.access, l1_hit, l2_way) {
            (access, true, _) => AccessResult::new(AccessState::hit(access), AccessState::NA),
            (AccessType::Read, false, Some(way)) => {
                self.promote(record.addr, &l2_addr, way);
                AccessResult::new(AccessState::RM, AccessState::RH)
            }
            (AccessType::Read, false, None) => {
                self.allocate(record.addr);
                AccessResult::new(AccessState::RM, AccessState::RM)
            }
            // a write-back into L2 happens here conceptually, but without
            // payload or dirty bits there is nothing to update
            (AccessType::Write, false, Some(_)) => {
                AccessResult::new(AccessState::WM, AccessState::WH)
            }
            // no-write-allocate: forwarded past both levels
            (AccessType::Write, false, None) => {
                AccessResult::new(AccessState::WM, AccessState::WM)
            }
        };

        self.accesses = self.accesses.saturating_add(1);
        self.l1.stats.record(result.l1);
        self.l2.stats.record(result.l2);
        trace!("{record} -> {result}");
        result
    }

    /// Read that missed L1 and hit L2 at `l2_way`.
    fn promote(&mut self, addr: u32, l2_addr: &DecodedAddr, l2_way: usize) {
        let victim = self.l1.insert(addr);
        match self.policy {
            InclusionPolicy::Exclusive => {
                self.l2.invalidate_way(l2_addr.index, l2_way);
                if let Some(victim) = victim {
                    self.write_back(victim);
                }
            }
            InclusionPolicy::NonInclusive => {
                if let Some(victim) = victim {
                    trace!("L1 victim {victim:#010x} dropped");
                }
            }
        }
    }

    /// Read that missed both levels.
    fn allocate(&mut self, addr: u32) {
        if let Some(victim) = self.l1.insert(addr) {
            trace!("L1 victim {victim:#010x} dropped");
        }
        if self.policy == InclusionPolicy::NonInclusive {
            if let Some(victim) = self.l2.insert(addr) {
                trace!("L2 victim {victim:#010x} dropped");
            }
        }
    }

    /// Moves an evicted L1 block into L2 unless L2 already holds it.
    /// `victim` is a base address under L1's geometry and is re-decoded
    /// under L2's.
    fn write_back(&mut self, victim: u32) {
        if self.l2.contains(victim) {
            debug!("L1 victim {victim:#010x} already resident in L2");
            return;
        }
        let dropped = self.l2.insert(victim);
        self.writebacks = self.writebacks.saturating_add(1);
        debug!(
            "L1 victim {victim:#010x} written back to L2{}",
            dropped.map_or(String::new(), |d| format!(", L2 evicted {d:#010x}"))
        );
    }

    /// Blocks resident in both levels, by L1 base address. Always empty in
    /// exclusive mode when both levels share a block size.
    pub fn shared_blocks(&self) -> Vec<u32> {
        self.l1
            .resident_blocks()
            .into_iter()
            .filter(|&addr| self.l2.contains(addr))
            .collect()
    }
}
