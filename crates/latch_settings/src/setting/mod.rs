//! Setting variants
//!
//! A closed set of variants behind one non-generic contract:
//! - [`SliderSetting`]: bounded float, clamped on write
//! - [`ChoiceSetting`]: one string out of an ordered option list
//! - [`TriggerSetting`]: button pulse, nothing persisted
//!
//! The registry and the presenter only ever talk to [`Setting`], which
//! dispatches on the variant tag. Each variant keeps its typed constraints.

mod base;
mod choice;
mod slider;
mod trigger;

pub use base::SettingBase;
pub use choice::ChoiceSetting;
pub use slider::SliderSetting;
pub use trigger::TriggerSetting;

use crate::error::SettingError;
use crate::signal::SubscriptionId;
use std::fmt;

/// Variant tag of a [`Setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Slider,
    Choice,
    Trigger,
}

impl SettingKind {
    pub fn name(self) -> &'static str {
        match self {
            SettingKind::Slider => "slider",
            SettingKind::Choice => "choice",
            SettingKind::Trigger => "trigger",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant-agnostic value used when reading or writing a setting by key.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Float(f32),
    Text(String),
    Unit,
}

impl SettingValue {
    fn kind_name(&self) -> &'static str {
        match self {
            SettingValue::Float(_) => "float",
            SettingValue::Text(_) => "text",
            SettingValue::Unit => "unit",
        }
    }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// A single configurable value of any variant.
#[derive(Debug)]
pub enum Setting {
    Slider(SliderSetting),
    Choice(ChoiceSetting),
    Trigger(TriggerSetting),
}

impl Setting {
    pub fn kind(&self) -> SettingKind {
        match self {
            Setting::Slider(_) => SettingKind::Slider,
            Setting::Choice(_) => SettingKind::Choice,
            Setting::Trigger(_) => SettingKind::Trigger,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Setting::Slider(s) => s.base().key(),
            Setting::Choice(s) => s.base().key(),
            Setting::Trigger(s) => s.base().key(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Setting::Slider(s) => s.base().display_name(),
            Setting::Choice(s) => s.base().display_name(),
            Setting::Trigger(s) => s.base().display_name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Setting::Slider(s) => s.base().description(),
            Setting::Choice(s) => s.base().description(),
            Setting::Trigger(s) => s.base().description(),
        }
    }

    pub fn value(&self) -> SettingValue {
        match self {
            Setting::Slider(s) => SettingValue::Float(s.value()),
            Setting::Choice(s) => SettingValue::Text(s.value().to_string()),
            Setting::Trigger(_) => SettingValue::Unit,
        }
    }

    pub fn default_value(&self) -> SettingValue {
        match self {
            Setting::Slider(s) => SettingValue::Float(s.default_value()),
            Setting::Choice(s) => SettingValue::Text(s.default_value().to_string()),
            Setting::Trigger(_) => SettingValue::Unit,
        }
    }

    /// Write through the variant's own validation. Returns whether the value changed.
    pub fn set_value(&mut self, value: SettingValue) -> Result<bool, SettingError> {
        match (self, value) {
            (Setting::Slider(s), SettingValue::Float(v)) => s.set_value(v),
            (Setting::Choice(s), SettingValue::Text(v)) => s.set_value(&v),
            (Setting::Trigger(_), SettingValue::Unit) => Ok(false),
            (setting, value) => Err(SettingError::KindMismatch {
                key: setting.key().to_string(),
                expected: setting.expected_value_kind(),
                actual: value.kind_name(),
            }),
        }
    }

    fn expected_value_kind(&self) -> &'static str {
        match self {
            Setting::Slider(_) => "float",
            Setting::Choice(_) => "text",
            Setting::Trigger(_) => "unit",
        }
    }

    pub fn reset_to_default(&mut self) -> bool {
        match self {
            Setting::Slider(s) => s.reset_to_default(),
            Setting::Choice(s) => s.reset_to_default(),
            Setting::Trigger(_) => false,
        }
    }

    pub fn serialize_value(&self) -> String {
        match self {
            Setting::Slider(s) => s.serialize_value(),
            Setting::Choice(s) => s.serialize_value(),
            Setting::Trigger(_) => String::new(),
        }
    }

    /// Decode a persisted payload. On error the current value is kept.
    pub fn deserialize_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        match self {
            Setting::Slider(s) => s.deserialize_value(payload),
            Setting::Choice(s) => s.deserialize_value(payload),
            Setting::Trigger(_) => Ok(false),
        }
    }

    /// Decode a persisted payload without notifying subscribers.
    pub fn restore_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        match self {
            Setting::Slider(s) => s.restore_value(payload),
            Setting::Choice(s) => s.restore_value(payload),
            Setting::Trigger(_) => Ok(false),
        }
    }

    /// Re-emit the current value without a change check.
    ///
    /// Triggers stay silent: their subscribers are actions, not state mirrors.
    pub fn apply_current_value(&mut self) {
        match self {
            Setting::Slider(s) => s.base_mut().notify(),
            Setting::Choice(s) => s.base_mut().notify(),
            Setting::Trigger(_) => {}
        }
    }

    /// Subscribe to the untyped change pulse.
    pub fn on_setting_changed<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        match self {
            Setting::Slider(s) => s.base_mut().on_setting_changed(subscriber),
            Setting::Choice(s) => s.base_mut().on_setting_changed(subscriber),
            Setting::Trigger(s) => s.base_mut().on_setting_changed(subscriber),
        }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self {
            Setting::Slider(s) => s.base_mut().unsubscribe(id),
            Setting::Choice(s) => s.base_mut().unsubscribe(id),
            Setting::Trigger(s) => s.base_mut().unsubscribe(id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        match self {
            Setting::Slider(s) => s.base().subscriber_count(),
            Setting::Choice(s) => s.base().subscriber_count(),
            Setting::Trigger(s) => s.base().subscriber_count(),
        }
    }

    pub fn clear_subscribers(&mut self) {
        match self {
            Setting::Slider(s) => s.base_mut().clear_subscribers(),
            Setting::Choice(s) => s.base_mut().clear_subscribers(),
            Setting::Trigger(s) => s.base_mut().clear_subscribers(),
        }
    }

    pub fn as_slider(&self) -> Option<&SliderSetting> {
        match self {
            Setting::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut SliderSetting> {
        match self {
            Setting::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceSetting> {
        match self {
            Setting::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choice_mut(&mut self) -> Option<&mut ChoiceSetting> {
        match self {
            Setting::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_trigger(&self) -> Option<&TriggerSetting> {
        match self {
            Setting::Trigger(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_trigger_mut(&mut self) -> Option<&mut TriggerSetting> {
        match self {
            Setting::Trigger(s) => Some(s),
            _ => None,
        }
    }
}

impl From<SliderSetting> for Setting {
    fn from(setting: SliderSetting) -> Self {
        Setting::Slider(setting)
    }
}

impl From<ChoiceSetting> for Setting {
    fn from(setting: ChoiceSetting) -> Self {
        Setting::Choice(setting)
    }
}

impl From<TriggerSetting> for Setting {
    fn from(setting: TriggerSetting) -> Self {
        Setting::Trigger(setting)
    }
}
