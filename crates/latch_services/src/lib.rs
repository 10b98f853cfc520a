//! Latch Services Layer
//!
//! Platform abstraction for save data and input.

pub mod input;
pub mod save;

use std::path::PathBuf;

pub use input::{InputState, MenuInput};
pub use save::{FileStorage, MemoryStorage, PlatformStorage, SaveError};

/// Service initialization: pick the storage backend for this platform.
///
/// `root` overrides the default data directory.
pub fn init_services(root: Option<PathBuf>) -> PlatformStorage {
    let root = root.unwrap_or_else(|| FileStorage::default_location().root().to_path_buf());
    tracing::info!(root = %root.display(), "initializing services");
    PlatformStorage::detect(root)
}
