pub mod config;
pub mod geometry;
pub mod hierarchy;
pub mod level;
pub mod set;
pub mod stats;

mod unit_tests;

pub use config::{CacheConfig, HierarchyConfig, InclusionPolicy};
pub use geometry::{DecodedAddr, Geometry};
pub use hierarchy::InclusionController;
pub use level::CacheLevel;
pub use set::{AssociativeSet, Line};
pub use stats::{HierarchyStats, LevelStats};
