use super::SettingBase;
use crate::error::SettingError;
use std::fmt::Display;
use std::str::FromStr;

/// One value out of a fixed, ordered list of options (quality, resolution, language).
///
/// The current value is always one of `options`. Writing anything else fails
/// with [`SettingError::InvalidChoice`] and leaves the value untouched.
#[derive(Debug)]
pub struct ChoiceSetting {
    base: SettingBase<String>,
    options: Vec<String>,
    display_names: Vec<String>,
}

impl ChoiceSetting {
    pub fn new<S: Into<String>>(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        default: &str,
    ) -> Result<Self, SettingError> {
        let key = key.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(SettingError::EmptyOptions { key });
        }
        if !options.iter().any(|option| option == default) {
            return Err(SettingError::InvalidChoice {
                key,
                value: default.to_string(),
            });
        }

        Ok(Self {
            base: SettingBase::new(key, display_name, description, default.to_string()),
            display_names: options.clone(),
            options,
        })
    }

    /// Build the option list from any displayable variant set, e.g. a fieldless enum.
    pub fn from_variants<V: Display>(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        variants: &[V],
        default: &V,
    ) -> Result<Self, SettingError> {
        let options = variants.iter().map(ToString::to_string);
        Self::new(key, display_name, description, options, &default.to_string())
    }

    /// Attach user-facing labels. A list whose length differs from the options
    /// is ignored and the raw options are displayed instead.
    pub fn with_display_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() == self.options.len() {
            self.display_names = names;
        } else {
            tracing::warn!(
                key = self.base.key(),
                expected = self.options.len(),
                actual = names.len(),
                "display name count does not match options; falling back to option values"
            );
        }
        self
    }

    pub fn base(&self) -> &SettingBase<String> {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SettingBase<String> {
        &mut self.base
    }

    #[inline]
    pub fn value(&self) -> &str {
        self.base.value()
    }

    #[inline]
    pub fn default_value(&self) -> &str {
        self.base.default_value()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn display_names(&self) -> &[String] {
        &self.display_names
    }

    pub fn current_index(&self) -> usize {
        self.index_of(self.value()).unwrap_or(0)
    }

    pub fn current_display_name(&self) -> &str {
        self.display_names
            .get(self.current_index())
            .map(String::as_str)
            .unwrap_or_else(|| self.value())
    }

    fn index_of(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option == value)
    }

    pub fn set_value(&mut self, value: &str) -> Result<bool, SettingError> {
        match self.index_of(value) {
            Some(index) => Ok(self.base.replace(self.options[index].clone())),
            None => Err(SettingError::InvalidChoice {
                key: self.base.key().to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn set_index(&mut self, index: usize) -> Result<bool, SettingError> {
        match self.options.get(index) {
            Some(option) => {
                let option = option.clone();
                Ok(self.base.replace(option))
            }
            None => Err(SettingError::IndexOutOfRange {
                key: self.base.key().to_string(),
                index,
                len: self.options.len(),
            }),
        }
    }

    /// Advance to the next option, wrapping past the end.
    pub fn move_next(&mut self) -> bool {
        let next = (self.current_index() + 1) % self.options.len();
        self.set_index(next).unwrap_or(false)
    }

    /// Step back to the previous option, wrapping past the start.
    pub fn move_previous(&mut self) -> bool {
        let len = self.options.len();
        let previous = (self.current_index() + len - 1) % len;
        self.set_index(previous).unwrap_or(false)
    }

    /// Parse the current value back into a typed variant.
    pub fn parse_value<V: FromStr>(&self) -> Option<V> {
        self.value().parse().ok()
    }

    pub fn reset_to_default(&mut self) -> bool {
        self.base.reset()
    }

    pub fn serialize_value(&self) -> String {
        self.value().to_string()
    }

    pub fn deserialize_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        let value = self.decode(payload)?;
        Ok(self.base.replace(value))
    }

    /// Like [`ChoiceSetting::deserialize_value`], without notifying subscribers.
    pub fn restore_value(&mut self, payload: &str) -> Result<bool, SettingError> {
        let value = self.decode(payload)?;
        Ok(self.base.restore(value))
    }

    fn decode(&self, payload: &str) -> Result<String, SettingError> {
        match self.index_of(payload) {
            Some(index) => Ok(self.options[index].clone()),
            None => Err(SettingError::Decode {
                key: self.base.key().to_string(),
                reason: format!("'{payload}' is not one of {:?}", self.options),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fmt;
    use std::rc::Rc;

    fn quality() -> ChoiceSetting {
        ChoiceSetting::new("quality", "Quality", "", ["Low", "Med", "High"], "Med").unwrap()
    }

    #[test]
    fn test_move_next_wraps() {
        let mut choice = quality();
        assert!(choice.move_next());
        assert_eq!(choice.value(), "High");
        assert!(choice.move_next());
        assert_eq!(choice.value(), "Low");
        assert!(choice.move_previous());
        assert_eq!(choice.value(), "High");
    }

    #[test]
    fn test_single_option_never_changes() {
        let mut choice = ChoiceSetting::new("lang", "Language", "", ["en"], "en").unwrap();
        assert!(!choice.move_next());
        assert!(!choice.move_previous());
    }

    #[test]
    fn test_absent_value_is_rejected() {
        let mut choice = quality();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        choice.base_mut().on_setting_changed(move || *counter.borrow_mut() += 1);

        let result = choice.set_value("Ultra");
        assert!(matches!(result, Err(SettingError::InvalidChoice { .. })));
        assert_eq!(choice.value(), "Med");
        assert!(matches!(
            choice.set_index(3),
            Err(SettingError::IndexOutOfRange { index: 3, len: 3, .. })
        ));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_equal_write_is_silent() {
        let mut choice = quality();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        choice.base_mut().on_setting_changed(move || *counter.borrow_mut() += 1);

        assert_eq!(choice.set_value("Med"), Ok(false));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_default_must_be_an_option() {
        let result = ChoiceSetting::new("quality", "Quality", "", ["Low", "High"], "Med");
        assert!(matches!(result, Err(SettingError::InvalidChoice { .. })));

        let empty: [&str; 0] = [];
        let result = ChoiceSetting::new("quality", "Quality", "", empty, "");
        assert!(matches!(result, Err(SettingError::EmptyOptions { .. })));
    }

    #[test]
    fn test_display_names_fall_back_on_length_mismatch() {
        let choice = quality().with_display_names(["Low", "Medium"]);
        assert_eq!(choice.display_names(), choice.options());

        let choice = quality().with_display_names(["Potato", "Medium", "Shiny"]);
        assert_eq!(choice.current_display_name(), "Medium");
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum WindowMode {
        Windowed,
        Borderless,
    }

    impl fmt::Display for WindowMode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl FromStr for WindowMode {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "Windowed" => Ok(Self::Windowed),
                "Borderless" => Ok(Self::Borderless),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn test_from_variants_and_parse() {
        let mut choice = ChoiceSetting::from_variants(
            "window_mode",
            "Window Mode",
            "",
            &[WindowMode::Windowed, WindowMode::Borderless],
            &WindowMode::Borderless,
        )
        .unwrap();

        assert_eq!(choice.parse_value::<WindowMode>(), Some(WindowMode::Borderless));
        choice.move_next();
        assert_eq!(choice.parse_value::<WindowMode>(), Some(WindowMode::Windowed));
    }

    #[test]
    fn test_deserialize_unknown_option_keeps_value() {
        let mut choice = quality();
        let result = choice.deserialize_value("Ultra");
        assert!(matches!(result, Err(SettingError::Decode { .. })));
        assert_eq!(choice.value(), "Med");

        choice.deserialize_value("High").unwrap();
        assert_eq!(choice.value(), "High");
    }
}
