use std::path::PathBuf;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use toml::{Table, Value};

use crate::cache::config::{CacheConfig, HierarchyConfig, InclusionPolicy};
use crate::error::{SimError, SimResult};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub policy: InclusionPolicy,
    pub log_level: u64,
    pub output: PathBuf,
    pub stats: Option<PathBuf>,
}

/// A TOML section. A missing section falls back to defaults; a present but
/// malformed one is a configuration error.
pub trait Config: DeserializeOwned + Default {
    fn from_section(name: &str, section: Option<&Value>) -> SimResult<Self> {
        match section {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|err| SimError::config(name, err.to_string())),
            None => {
                warn!("config section [{}] not found, using defaults", name);
                Ok(Self::default())
            }
        }
    }
}

impl Config for SimConfig {}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: InclusionPolicy::Exclusive,
            log_level: 0,
            output: PathBuf::from("output.txt"),
            stats: None,
        }
    }
}

/// Everything a config file describes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimSetup {
    pub sim: SimConfig,
    pub hierarchy: HierarchyConfig,
}

/// Parses the `[sim]`, `[l1]` and `[l2]` tables.
pub fn parse_toml(text: &str) -> SimResult<SimSetup> {
    let table: Table =
        toml::from_str(text).map_err(|err| SimError::config("config file", err.to_string()))?;
    let sim = SimConfig::from_section("sim", table.get("sim"))?;
    let l1 = CacheConfig::from_section("L1", table.get("l1"))?;
    let l2 = CacheConfig::from_section("L2", table.get("l2"))?;
    Ok(SimSetup {
        sim,
        hierarchy: HierarchyConfig::new(l1, l2),
    })
}

/// Parses the plain config format: per level a label token (`L1:`, `L2:`)
/// followed by block size, ways and size in KiB, all whitespace separated.
/// Anything after the second level is ignored.
pub fn parse_legacy(text: &str) -> SimResult<HierarchyConfig> {
    let mut tokens = text.split_whitespace();
    let l1 = parse_legacy_level("L1", &mut tokens)?;
    let l2 = parse_legacy_level("L2", &mut tokens)?;
    Ok(HierarchyConfig::new(l1, l2))
}

fn parse_legacy_level<'a>(
    level: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> SimResult<CacheConfig> {
    let _label = tokens
        .next()
        .ok_or_else(|| SimError::config(level, "missing section label"))?;
    let mut field = |name: &str| -> SimResult<u32> {
        let token = tokens
            .next()
            .ok_or_else(|| SimError::config(level, format!("missing {}", name)))?;
        token
            .parse()
            .map_err(|err| SimError::config(level, format!("{} {:?}: {}", name, token, err)))
    };
    let block_size = field("block size")?;
    let ways = field("ways per set")?;
    let size_kb = field("size in KiB")?;
    Ok(CacheConfig::new(block_size, ways, size_kb))
}
