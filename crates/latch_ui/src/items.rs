//! Setting controls
//!
//! Each control owns its horizontal input: a slider steps its value, a choice
//! cycles its options, a trigger ignores it. Controls keep a local copy of the
//! value so repeated input accumulates between refreshes.

use crate::display::{SettingDisplayData, SettingDisplayKind};
use crate::event::UiEvent;
use latch_core::math;
use latch_services::input::DEAD_ZONE;

/// Slider change per horizontal input.
pub const SLIDER_STEP: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingItem {
    Slider(SliderItem),
    Choice(ChoiceItem),
    Trigger(TriggerItem),
}

impl SettingItem {
    pub fn from_display(data: &SettingDisplayData) -> Self {
        let key = data.key.clone();
        match &data.kind {
            SettingDisplayKind::Slider { value, min, max } => SettingItem::Slider(SliderItem {
                key,
                value: *value,
                min: *min,
                max: *max,
            }),
            SettingDisplayKind::Choice {
                value,
                options,
                display_names,
            } => SettingItem::Choice(ChoiceItem {
                key,
                index: options.iter().position(|o| o == value).unwrap_or(0),
                options: options.clone(),
                display_names: display_names.clone(),
            }),
            SettingDisplayKind::Trigger { button_text, .. } => SettingItem::Trigger(TriggerItem {
                key,
                button_text: button_text.clone(),
            }),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SettingItem::Slider(item) => &item.key,
            SettingItem::Choice(item) => &item.key,
            SettingItem::Trigger(item) => &item.key,
        }
    }

    /// Left/right input. Input inside the dead zone is ignored.
    pub fn navigate_horizontal(&mut self, direction: f32) -> Option<UiEvent> {
        if !direction.is_finite() || direction.abs() < DEAD_ZONE {
            return None;
        }
        match self {
            SettingItem::Slider(item) => item.step(direction),
            SettingItem::Choice(item) => item.cycle(direction > 0.0),
            SettingItem::Trigger(_) => None,
        }
    }

    /// Submit input. A choice advances to its next option, a trigger fires.
    pub fn submit(&mut self) -> Option<UiEvent> {
        match self {
            SettingItem::Slider(_) => None,
            SettingItem::Choice(item) => item.cycle(true),
            SettingItem::Trigger(item) => Some(UiEvent::TriggerFired {
                key: item.key.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderItem {
    key: String,
    value: f32,
    min: f32,
    max: f32,
}

impl SliderItem {
    pub fn value(&self) -> f32 {
        self.value
    }

    fn step(&mut self, direction: f32) -> Option<UiEvent> {
        let delta = if direction > 0.0 { SLIDER_STEP } else { -SLIDER_STEP };
        let value = math::clamp(self.value + delta, self.min, self.max);
        if value == self.value {
            return None;
        }

        self.value = value;
        Some(UiEvent::SliderCommitted {
            key: self.key.clone(),
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceItem {
    key: String,
    options: Vec<String>,
    display_names: Vec<String>,
    index: usize,
}

impl ChoiceItem {
    pub fn value(&self) -> Option<&str> {
        self.options.get(self.index).map(String::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_names
            .get(self.index)
            .or_else(|| self.options.get(self.index))
            .map(String::as_str)
    }

    fn cycle(&mut self, forward: bool) -> Option<UiEvent> {
        let len = self.options.len();
        if len < 2 {
            return None;
        }

        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
        Some(UiEvent::ChoiceCommitted {
            key: self.key.clone(),
            value: self.options[self.index].clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerItem {
    key: String,
    button_text: String,
}

impl TriggerItem {
    pub fn button_text(&self) -> &str {
        &self.button_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(value: f32) -> SettingItem {
        SettingItem::from_display(&SettingDisplayData {
            key: "volume".into(),
            display_name: "Volume".into(),
            description: String::new(),
            kind: SettingDisplayKind::Slider {
                value,
                min: 0.0,
                max: 1.0,
            },
        })
    }

    fn choice() -> SettingItem {
        SettingItem::from_display(&SettingDisplayData {
            key: "quality".into(),
            display_name: "Quality".into(),
            description: String::new(),
            kind: SettingDisplayKind::Choice {
                value: "Med".into(),
                options: vec!["Low".into(), "Med".into(), "High".into()],
                display_names: vec!["Low".into(), "Medium".into(), "High".into()],
            },
        })
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let mut item = slider(0.98);
        assert_eq!(
            item.navigate_horizontal(1.0),
            Some(UiEvent::SliderCommitted {
                key: "volume".into(),
                value: 1.0
            })
        );
        assert_eq!(item.navigate_horizontal(1.0), None);

        let event = item.navigate_horizontal(-0.5);
        match event {
            Some(UiEvent::SliderCommitted { value, .. }) => assert!((value - 0.95).abs() < 1e-6),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_dead_zone_ignored() {
        let mut item = slider(0.5);
        assert_eq!(item.navigate_horizontal(0.05), None);
        assert_eq!(item.navigate_horizontal(-0.09), None);
        assert_eq!(item.navigate_horizontal(f32::NAN), None);
    }

    #[test]
    fn test_choice_cycles_with_wrap() {
        let mut item = choice();
        assert_eq!(
            item.navigate_horizontal(1.0),
            Some(UiEvent::ChoiceCommitted {
                key: "quality".into(),
                value: "High".into()
            })
        );
        assert_eq!(
            item.submit(),
            Some(UiEvent::ChoiceCommitted {
                key: "quality".into(),
                value: "Low".into()
            })
        );
        assert_eq!(
            item.navigate_horizontal(-1.0),
            Some(UiEvent::ChoiceCommitted {
                key: "quality".into(),
                value: "High".into()
            })
        );
        if let SettingItem::Choice(choice) = &item {
            assert_eq!(choice.display_name(), Some("High"));
        }
    }

    #[test]
    fn test_trigger_ignores_horizontal() {
        let mut item = SettingItem::from_display(&SettingDisplayData {
            key: "reset".into(),
            display_name: "Reset".into(),
            description: String::new(),
            kind: SettingDisplayKind::Trigger {
                button_text: "Reset".into(),
                requires_confirmation: false,
                confirmation_message: String::new(),
            },
        });
        assert_eq!(item.navigate_horizontal(1.0), None);
        assert_eq!(item.submit(), Some(UiEvent::TriggerFired { key: "reset".into() }));
        assert_eq!(slider(0.5).submit(), None);
    }
}
