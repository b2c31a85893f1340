use log::trace;

use crate::cache::config::CacheConfig;
use crate::cache::geometry::{DecodedAddr, Geometry};
use crate::cache::set::AssociativeSet;
use crate::cache::stats::LevelStats;
use crate::error::SimResult;

/// One cache level: a geometry and the sets it addresses. Each level owns
/// its sets outright; L1 and L2 never share state.
#[derive(Debug, Clone)]
pub struct CacheLevel {
    name: String,
    geometry: Geometry,
    sets: Vec<AssociativeSet>,
    pub(crate) stats: LevelStats,
}

impl CacheLevel {
    pub fn new(name: &str, config: &CacheConfig) -> SimResult<Self> {
        let geometry = Geometry::new(name, config)?;
        let sets = (0..geometry.num_sets())
            .map(|_| AssociativeSet::new(geometry.ways()))
            .collect();
        Ok(Self {
            name: name.to_string(),
            geometry,
            sets,
            stats: LevelStats::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn stats(&self) -> &LevelStats {
        &self.stats
    }

    pub fn set(&self, index: usize) -> &AssociativeSet {
        &self.sets[index]
    }

    pub fn sets(&self) -> &[AssociativeSet] {
        &self.sets
    }

    pub fn decode(&self, addr: u32) -> DecodedAddr {
        self.geometry.decode(addr)
    }

    pub fn reconstruct_address(&self, tag: u32, index: usize) -> u32 {
        self.geometry.reconstruct(tag, index)
    }

    /// Way holding the block of a decoded address, if resident.
    pub fn find(&self, decoded: &DecodedAddr) -> Option<usize> {
        self.sets[decoded.index].find(decoded.tag)
    }

    pub fn probe(&self, addr: u32) -> bool {
        self.find(&self.decode(addr)).is_some()
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.probe(addr)
    }

    /// Installs the block containing `addr` at the set's replacement slot.
    /// Returns the base address of the block it displaced, if any.
    ///
    /// Does not check for an existing copy; callers probe first.
    pub fn insert(&mut self, addr: u32) -> Option<u32> {
        let decoded = self.decode(addr);
        let (way, evicted) = self.sets[decoded.index].fill(decoded.tag);
        self.stats.record_fill(evicted.is_some());
        let victim = evicted.map(|line| self.reconstruct_address(line.tag, decoded.index));
        trace!(
            "{}: fill {:#010x} -> set {} way {}{}",
            self.name,
            self.geometry.block_base(addr),
            decoded.index,
            way,
            victim.map_or(String::new(), |v| format!(", evicted {:#010x}", v))
        );
        victim
    }

    pub fn invalidate_way(&mut self, index: usize, way: usize) -> bool {
        let cleared = self.sets[index].invalidate(way).is_some();
        if cleared {
            self.stats.record_invalidation();
        }
        cleared
    }

    /// Drops the block containing `addr`. Returns whether it was resident.
    pub fn invalidate(&mut self, addr: u32) -> bool {
        let decoded = self.decode(addr);
        match self.find(&decoded) {
            Some(way) => self.invalidate_way(decoded.index, way),
            None => false,
        }
    }

    /// Base addresses of every valid line, in set then way order.
    pub fn resident_blocks(&self) -> Vec<u32> {
        self.sets
            .iter()
            .enumerate()
            .flat_map(|(index, set)| {
                set.valid_tags()
                    .map(move |tag| self.geometry.reconstruct(tag, index))
            })
            .collect()
    }

    pub fn occupancy(&self) -> usize {
        self.sets.iter().map(AssociativeSet::occupancy).sum()
    }
}
