//! Latch Engine Core
//!
//! Shared foundations for the engine crates:
//! - Engine version
//! - Scalar math helpers

pub mod math;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
