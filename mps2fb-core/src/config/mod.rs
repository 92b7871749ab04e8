//! Configuration types
//!
//! Device properties fixed at realize time.

pub mod types;

pub use types::*;
