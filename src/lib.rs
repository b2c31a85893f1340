//! Trace-driven simulator for a two-level (L1/L2) cache hierarchy.
//!
//! Given the geometry of both levels and a sequence of reads/writes to
//! 32-bit addresses, reports per access whether each level hit or missed,
//! while evolving cache contents under an exclusive or non-inclusive policy
//! with round-robin replacement.

pub mod base;
pub mod cache;
pub mod error;
pub mod sim;
pub mod ui;

pub use base::{AccessRecord, AccessResult, AccessState, AccessType};
pub use cache::{CacheConfig, HierarchyConfig, InclusionController, InclusionPolicy};
pub use error::{SimError, SimResult};
pub use sim::TraceRunner;
