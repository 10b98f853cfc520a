//! Display records handed to the view
//!
//! Read-only copies of category and setting state, taken once per refresh. The
//! view renders from these and never holds on to the settings themselves.

use latch_settings::{Category, Setting};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDisplayData {
    pub name: String,
    pub restricted: bool,
    pub settings: Vec<SettingDisplayData>,
}

impl From<&Category> for CategoryDisplayData {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name().to_string(),
            restricted: category.is_restricted(),
            settings: category.settings().iter().map(SettingDisplayData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDisplayData {
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub kind: SettingDisplayKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingDisplayKind {
    Slider {
        value: f32,
        min: f32,
        max: f32,
    },
    Choice {
        value: String,
        options: Vec<String>,
        display_names: Vec<String>,
    },
    Trigger {
        button_text: String,
        requires_confirmation: bool,
        confirmation_message: String,
    },
}

impl From<&Setting> for SettingDisplayData {
    fn from(setting: &Setting) -> Self {
        let kind = match setting {
            Setting::Slider(slider) => SettingDisplayKind::Slider {
                value: slider.value(),
                min: slider.min(),
                max: slider.max(),
            },
            Setting::Choice(choice) => SettingDisplayKind::Choice {
                value: choice.value().to_string(),
                options: choice.options().to_vec(),
                display_names: choice.display_names().to_vec(),
            },
            Setting::Trigger(trigger) => SettingDisplayKind::Trigger {
                button_text: trigger.button_text().to_string(),
                requires_confirmation: trigger.requires_confirmation(),
                confirmation_message: trigger.confirmation_message().to_string(),
            },
        };

        Self {
            key: setting.key().to_string(),
            display_name: setting.display_name().to_string(),
            description: setting.description().to_string(),
            kind,
        }
    }
}

/// Snapshot every category, leaving out restricted ones when `include_restricted` is false.
pub fn collect_categories(
    categories: &[Category],
    include_restricted: bool,
) -> Vec<CategoryDisplayData> {
    categories
        .iter()
        .filter(|category| include_restricted || !category.is_restricted())
        .map(CategoryDisplayData::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use latch_settings::{ChoiceSetting, SliderSetting, TriggerSetting};

    fn categories() -> Vec<Category> {
        vec![
            Category::new(
                "Audio",
                [SliderSetting::new("volume", "Volume", "Master volume", 0.8, 0.0, 1.0).unwrap()],
            ),
            Category::new(
                "Graphics",
                [ChoiceSetting::new("quality", "Quality", "", ["Low", "High"], "High")
                    .unwrap()
                    .with_display_names(["Fast", "Pretty"])],
            ),
            Category::new(
                "Data",
                [TriggerSetting::new("delete_save", "Delete Save", "", "Delete")
                    .with_confirmation("Delete all save data?")],
            )
            .restricted(),
        ]
    }

    #[test]
    fn test_display_records() {
        let data = collect_categories(&categories(), true);
        assert_eq!(data.len(), 3);

        let volume = &data[0].settings[0];
        assert_eq!(volume.key, "volume");
        assert_eq!(volume.description, "Master volume");
        assert_eq!(
            volume.kind,
            SettingDisplayKind::Slider {
                value: 0.8,
                min: 0.0,
                max: 1.0
            }
        );

        match &data[1].settings[0].kind {
            SettingDisplayKind::Choice {
                value,
                display_names,
                ..
            } => {
                assert_eq!(value, "High");
                assert_eq!(display_names, &["Fast", "Pretty"]);
            }
            other => panic!("unexpected kind {other:?}"),
        }

        assert!(data[2].restricted);
        assert!(matches!(
            data[2].settings[0].kind,
            SettingDisplayKind::Trigger {
                requires_confirmation: true,
                ..
            }
        ));
    }

    #[test]
    fn test_restricted_categories_filtered() {
        let data = collect_categories(&categories(), false);
        let names: Vec<_> = data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Audio", "Graphics"]);
    }
}
