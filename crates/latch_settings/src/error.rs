use thiserror::Error;

/// Errors raised by a single setting when a write or decode is refused.
///
/// The setting's value is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingError {
    #[error("'{value}' is not an option of setting '{key}'")]
    InvalidChoice { key: String, value: String },

    #[error("option index {index} is out of range for setting '{key}' ({len} options)")]
    IndexOutOfRange { key: String, index: usize, len: usize },

    #[error("setting '{key}' holds a {expected} value but was given a {actual} value")]
    KindMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("setting '{key}' rejected non-finite value {value}")]
    NotFinite { key: String, value: f32 },

    #[error("setting '{key}' has an invalid range [{min}, {max}]")]
    InvalidRange { key: String, min: f32, max: f32 },

    #[error("choice setting '{key}' has no options")]
    EmptyOptions { key: String },

    #[error("could not decode persisted value for '{key}': {reason}")]
    Decode { key: String, reason: String },
}

/// Errors raised by the settings registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("category '{category}' contains a setting with an empty key")]
    EmptyKey { category: String },

    #[error("setting key '{key}' is declared more than once")]
    DuplicateKey { key: String },

    #[error("category '{name}' is declared more than once")]
    DuplicateCategory { name: String },

    #[error("no setting is registered under '{key}'")]
    NotFound { key: String },

    #[error(transparent)]
    Setting(#[from] SettingError),
}
