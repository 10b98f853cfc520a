//! Named, ordered groups of settings. Each category doubles as a menu tab.

use crate::setting::Setting;

#[derive(Debug)]
pub struct Category {
    name: String,
    settings: Vec<Setting>,
    restricted_context: bool,
}

impl Category {
    pub fn new<S: Into<Setting>>(name: impl Into<String>, settings: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            settings: settings.into_iter().map(Into::into).collect(),
            restricted_context: false,
        }
    }

    /// Only show this category outside active gameplay.
    pub fn restricted(mut self) -> Self {
        self.restricted_context = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings in display (and navigation) order.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut [Setting] {
        &mut self.settings
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted_context
    }

    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.settings.iter().find(|setting| setting.key() == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Setting> {
        self.settings.iter_mut().find(|setting| setting.key() == key)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
