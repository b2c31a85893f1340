use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::cache::config::{CacheConfig, HierarchyConfig, InclusionPolicy};
use crate::cache::stats::{HierarchyStats, LevelStats};
use crate::error::SimResult;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelSummary {
    pub block_size: u32,
    pub ways: u32,
    pub size_kb: u32,
    pub hit_rate: f64,
    #[serde(flatten)]
    pub stats: LevelStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub trace: Option<PathBuf>,
    pub policy: InclusionPolicy,
    pub processed: u64,
    pub accesses: u64,
    pub writebacks: u64,
    pub l1: LevelSummary,
    pub l2: LevelSummary,
}

impl RunSummary {
    pub fn new(
        trace: Option<PathBuf>,
        policy: InclusionPolicy,
        config: &HierarchyConfig,
        processed: u64,
        stats: &HierarchyStats,
    ) -> Self {
        let level = |config: &CacheConfig, stats: &LevelStats| LevelSummary {
            block_size: config.block_size,
            ways: config.ways,
            size_kb: config.size_kb,
            hit_rate: stats.hit_rate(),
            stats: *stats,
        };
        Self {
            trace,
            policy,
            processed,
            accesses: stats.accesses,
            writebacks: stats.writebacks,
            l1: level(&config.l1, &stats.l1),
            l2: level(&config.l2, &stats.l2),
        }
    }

    pub fn log(&self) {
        info!(
            "{} accesses ({}): L1 {}/{} hits ({:.2}%), L2 {}/{} hits ({:.2}%), {} write-backs",
            self.processed,
            self.policy,
            self.l1.stats.hits(),
            self.l1.stats.accesses(),
            self.l1.hit_rate * 100.0,
            self.l2.stats.hits(),
            self.l2.stats.accesses(),
            self.l2.hit_rate * 100.0,
            self.writebacks,
        );
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> SimResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(summary).map_err(std::io::Error::from)?;
    fs::write(path, payload)?;
    info!("wrote run summary to {}", path.display());
    Ok(())
}
