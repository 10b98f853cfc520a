use super::SettingBase;
use crate::error::SettingError;
use latch_core::math;

/// Continuous value bounded by `[min, max]` (volumes, sensitivities).
///
/// Writes outside the range are clamped, never rejected.
#[derive(Debug)]
pub struct SliderSetting {
    base: SettingBase<f32>,
    min: f32,
    max: f32,
}

impl SliderSetting {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        default: f32,
        min: f32,
        max: f32,
    ) -> Result<Self, SettingError> {
        let key = key.into();
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SettingError::InvalidRange { key, min, max });
        }
        if !default.is_finite() {
            return Err(SettingError::NotFinite {
                key,
                value: default,
            });
        }

        let default = math::clamp(default, min, max);
        Ok(Self {
            base: SettingBase::new(key, display_name, description, default),
            min,
            max,
        })
    }

    pub fn base(&self) -> &SettingBase<f32> {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SettingBase<f32> {
        &mut self.base
    }

    #[inline]
    pub fn value(&self) -> f32 {
        *self.base.value()
    }

    #[inline]
    pub fn default_value(&self) -> f32 {
        *self.base.default_value()
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp `value` into range and store it. Returns whether the value changed.
    pub fn set_value(&mut self, value: f32) -> Result<bool, SettingError> {
        if !value.is_finite() {
            return Err(SettingError::NotFinite {
                key: self.base.key().to_string(),
                value,
            });
        }
        Ok(self.base.replace(math::clamp(value, self.min, self.max)))
    }

    /// Position of the current value inside the range, in `[0, 1]`.
    pub fn normalized(&self) -> f32 {
        math::inverse_lerp(self.min, self.max, self.value())
    }

    pub fn set_normalized(&mut self, t: f32) -> Result<bool, SettingError> {
        if !t.is_finite() {
            return Err(SettingError::NotFinite {
                key: self.base.key().to_string(),
                value: t,
            });
        }
        self.set_value(math::lerp(self.min, self.max, t))
    }

    pub fn reset_to_default(&mut self) -> bool {
        self.base.reset()
    }

    pub fn serialize_value(&self) -> String {
        self.value().to_string()
    }

    pub fn deserialize_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        let value = self.decode(payload)?;
        self.set_value(value)
    }

    /// Like [`SliderSetting::deserialize_value`], without notifying subscribers.
    pub fn restore_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        let value = self.decode(payload)?;
        Ok(self.base.restore(math::clamp(value, self.min, self.max)))
    }

    fn decode(&self, payload: &str) -> Result<f32, SettingError> {
        let parsed: f32 = payload.trim().parse().map_err(|e| SettingError::Decode {
            key: self.base.key().to_string(),
            reason: format!("'{payload}' is not a number: {e}"),
        })?;
        if !parsed.is_finite() {
            return Err(SettingError::Decode {
                key: self.base.key().to_string(),
                reason: format!("'{payload}' is not a finite number"),
            });
        }
        Ok(parsed)
    }
}
