pub mod access;

pub use access::{AccessRecord, AccessResult, AccessState, AccessType};
