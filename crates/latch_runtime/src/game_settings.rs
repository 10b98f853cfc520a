//! Settings the runtime ships with, and where their changes go.

use async_trait::async_trait;
use latch_services::PlatformStorage;
use latch_settings::{
    Category, ChoiceSetting, Setting, SettingError, SettingsDefinition, SliderSetting,
    TriggerSetting,
};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Save slot removed by the "Delete Save" trigger.
pub const SAVE_SLOT_KEY: &str = "save_slot_0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Windowed,
    Borderless,
    Fullscreen,
}

impl WindowMode {
    pub const ALL: [WindowMode; 3] = [
        WindowMode::Windowed,
        WindowMode::Borderless,
        WindowMode::Fullscreen,
    ];
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowMode::Windowed => "windowed",
            WindowMode::Borderless => "borderless",
            WindowMode::Fullscreen => "fullscreen",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowMode::ALL
            .into_iter()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| format!("unknown window mode '{s}'"))
    }
}

pub struct GameSettingsDefinition {
    storage: Rc<PlatformStorage>,
    reset_requested: Rc<Cell<bool>>,
}

impl GameSettingsDefinition {
    pub fn new(storage: Rc<PlatformStorage>) -> Self {
        Self {
            storage,
            reset_requested: Rc::new(Cell::new(false)),
        }
    }

    /// Set when the player confirms "Reset to Defaults". The game loop owns the
    /// registry and performs the reset.
    pub fn reset_requested(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.reset_requested)
    }

    fn audio() -> Result<Category, SettingError> {
        Ok(Category::new(
            "Audio",
            [
                SliderSetting::new("master_volume", "Master Volume", "Overall loudness", 0.8, 0.0, 1.0)?,
                SliderSetting::new("music_volume", "Music", "", 0.6, 0.0, 1.0)?,
                SliderSetting::new("sfx_volume", "Effects", "", 0.7, 0.0, 1.0)?,
            ],
        ))
    }

    fn graphics() -> Result<Category, SettingError> {
        let quality = ChoiceSetting::new(
            "quality",
            "Quality",
            "Rendering detail",
            ["low", "medium", "high", "ultra"],
            "high",
        )?
        .with_display_names(["Low", "Medium", "High", "Ultra"]);

        let window_mode = ChoiceSetting::from_variants(
            "window_mode",
            "Window Mode",
            "",
            &WindowMode::ALL,
            &WindowMode::Borderless,
        )?
        .with_display_names(["Windowed", "Borderless Window", "Fullscreen"]);

        Ok(Category::new(
            "Graphics",
            [Setting::from(quality), Setting::from(window_mode)],
        ))
    }

    fn data() -> Category {
        Category::new(
            "Data",
            [
                TriggerSetting::new("reset_defaults", "Reset to Defaults", "", "Reset")
                    .with_confirmation("Restore every setting to its default value?"),
                TriggerSetting::new("delete_save", "Delete Save Data", "", "Delete")
                    .with_confirmation("Delete all save data? This cannot be undone."),
            ],
        )
        .restricted()
    }
}

fn find_setting<'a>(categories: &'a mut [Category], key: &str) -> Option<&'a mut Setting> {
    categories.iter_mut().find_map(|category| category.get_mut(key))
}

#[async_trait(?Send)]
impl SettingsDefinition for GameSettingsDefinition {
    async fn wait_for_initialization(&self) {
        // Localization tables load on the runtime before labels are final.
        tokio::task::yield_now().await;
        tracing::debug!("settings definition ready");
    }

    fn create_categories(&self) -> Vec<Category> {
        let built = Self::audio().and_then(|audio| Ok(vec![audio, Self::graphics()?, Self::data()]));
        match built {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(error = %e, "invalid built-in settings; menu will be empty");
                Vec::new()
            }
        }
    }

    fn bind_setting_actions(&self, categories: &mut [Category]) {
        for key in ["master_volume", "music_volume", "sfx_volume"] {
            if let Some(slider) = find_setting(categories, key).and_then(Setting::as_slider_mut) {
                slider
                    .base_mut()
                    .on_value_changed(move |volume| tracing::info!(bus = key, volume, "mixer volume set"));
            }
        }

        if let Some(choice) = find_setting(categories, "quality").and_then(Setting::as_choice_mut) {
            choice
                .base_mut()
                .on_value_changed(|quality| tracing::info!(%quality, "render quality set"));
        }

        if let Some(choice) = find_setting(categories, "window_mode").and_then(Setting::as_choice_mut) {
            choice.base_mut().on_value_changed(|mode| match mode.parse::<WindowMode>() {
                Ok(mode) => tracing::info!(%mode, "window mode set"),
                Err(e) => tracing::warn!(error = %e, "window mode not applied"),
            });
        }

        if let Some(trigger) = find_setting(categories, "reset_defaults").and_then(Setting::as_trigger_mut) {
            let reset_requested = Rc::clone(&self.reset_requested);
            trigger.on_fired(move || reset_requested.set(true));
        }

        if let Some(trigger) = find_setting(categories, "delete_save").and_then(Setting::as_trigger_mut) {
            let storage = Rc::clone(&self.storage);
            trigger.on_fired(move || {
                if storage.delete(SAVE_SLOT_KEY) {
                    tracing::info!(slot = SAVE_SLOT_KEY, "save data deleted");
                } else {
                    tracing::info!(slot = SAVE_SLOT_KEY, "no save data to delete");
                }
            });
        }
    }
}
