//! Latch Settings
//!
//! Typed, persisted, reactive game settings:
//! - Setting variants (slider, choice, trigger) behind one contract
//! - Categories (menu tabs)
//! - The registry that owns them, persists snapshots and re-broadcasts changes
//!
//! Everything here is single-threaded and synchronous; notifications run on
//! the caller's thread before the mutating call returns.

pub mod category;
pub mod definition;
pub mod error;
pub mod manager;
pub mod setting;
pub mod signal;
pub mod snapshot;
pub mod storage;

pub use category::Category;
pub use definition::SettingsDefinition;
pub use error::{SettingError, SettingsError};
pub use manager::{ManagerConfig, ManagerState, SettingsManager, DEFAULT_STORAGE_KEY};
pub use setting::{
    ChoiceSetting, Setting, SettingKind, SettingValue, SliderSetting, TriggerSetting,
};
pub use signal::{Signal, SubscriptionId};
pub use snapshot::{SettingEntry, SettingsSnapshot, SnapshotError};
pub use storage::SettingsStorage;
