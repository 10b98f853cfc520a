use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding where settings are stored.
pub const SETTINGS_DIR_VAR: &str = "LATCH_SETTINGS_DIR";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Settings directory; `None` uses the platform data directory.
    pub settings_dir: Option<PathBuf>,
    pub window_title: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settings_dir: None,
            window_title: "Latch Engine".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::default().with_settings_dir_override(std::env::var_os(SETTINGS_DIR_VAR))
    }

    /// Apply an override value. Empty values are ignored.
    pub fn with_settings_dir_override(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|dir| !dir.is_empty()) {
            self.settings_dir = Some(PathBuf::from(dir));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_platform_dir() {
        let config = RuntimeConfig::default();
        assert!(config.settings_dir.is_none());
        assert_eq!(config.window_title, "Latch Engine");
    }

    #[test]
    fn test_override() {
        let config = RuntimeConfig::default().with_settings_dir_override(Some("/tmp/latch".into()));
        assert_eq!(config.settings_dir, Some(PathBuf::from("/tmp/latch")));

        let config = RuntimeConfig::default().with_settings_dir_override(Some(OsString::new()));
        assert!(config.settings_dir.is_none());
    }
}
