use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sim::config::Config;

/// Geometry of one cache level as written in the config file.
///
/// `ways == 0` requests a fully associative level: the way count becomes
/// `size_kb * 1024 / block_size` and the level has a single set.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub block_size: u32,
    pub ways: u32,
    pub size_kb: u32,
}

impl Config for CacheConfig {}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            block_size: 64,
            ways: 4,
            size_kb: 32,
        }
    }
}

impl CacheConfig {
    pub fn new(block_size: u32, ways: u32, size_kb: u32) -> Self {
        Self {
            block_size,
            ways,
            size_kb,
        }
    }

    pub fn fully_associative(block_size: u32, size_kb: u32) -> Self {
        Self::new(block_size, 0, size_kb)
    }

    pub fn is_fully_associative(&self) -> bool {
        self.ways == 0
    }

    pub fn total_bytes(&self) -> u64 {
        (self.size_kb as u64) << 10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HierarchyConfig {
    pub l1: CacheConfig,
    pub l2: CacheConfig,
}

impl HierarchyConfig {
    pub fn new(l1: CacheConfig, l2: CacheConfig) -> Self {
        Self { l1, l2 }
    }
}

/// What the hierarchy does with L1/L2 contents on a read that misses L1.
/// Write handling is identical under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InclusionPolicy {
    /// A block lives in at most one level. L2 hits move the block up into
    /// L1 and L1 victims are written back into L2.
    #[default]
    Exclusive,
    /// No guarantee either way. Misses fill both levels, L2 keeps its copy on
    /// an L2 hit, and L1 victims are dropped.
    #[serde(alias = "non_inclusive", alias = "noninclusive")]
    NonInclusive,
}

impl FromStr for InclusionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "exclusive" => Ok(Self::Exclusive),
            "non-inclusive" | "non_inclusive" | "noninclusive" => Ok(Self::NonInclusive),
            _ => Err(format!(
                "unsupported inclusion policy '{}', expected one of: exclusive, non-inclusive",
                value
            )),
        }
    }
}

impl fmt::Display for InclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclusive => write!(f, "exclusive"),
            Self::NonInclusive => write!(f, "non-inclusive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_both_spellings() {
        assert_eq!("exclusive".parse(), Ok(InclusionPolicy::Exclusive));
        assert_eq!("Non-Inclusive".parse(), Ok(InclusionPolicy::NonInclusive));
        assert_eq!("non_inclusive".parse(), Ok(InclusionPolicy::NonInclusive));
        assert!("inclusive".parse::<InclusionPolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips_through_from_str() {
        for policy in [InclusionPolicy::Exclusive, InclusionPolicy::NonInclusive] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }

    #[test]
    fn zero_ways_means_fully_associative() {
        let config = CacheConfig::fully_associative(16, 8);
        assert!(config.is_fully_associative());
        assert_eq!(config.total_bytes(), 8192);
    }
}
