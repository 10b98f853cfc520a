use super::SettingBase;
use crate::signal::SubscriptionId;

/// Button-like setting (delete save data, restore defaults).
///
/// It has no value worth persisting: [`TriggerSetting::execute`] fires a pulse
/// to the subscribers registered with [`TriggerSetting::on_fired`]. The
/// confirmation flag is only read by the UI boundary.
#[derive(Debug)]
pub struct TriggerSetting {
    base: SettingBase<()>,
    button_text: String,
    requires_confirmation: bool,
    confirmation_message: String,
}

impl TriggerSetting {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        button_text: impl Into<String>,
    ) -> Self {
        Self {
            base: SettingBase::new(key, display_name, description, ()),
            button_text: button_text.into(),
            requires_confirmation: false,
            confirmation_message: String::new(),
        }
    }

    /// Ask the UI to confirm with `message` before firing.
    pub fn with_confirmation(mut self, message: impl Into<String>) -> Self {
        self.requires_confirmation = true;
        self.confirmation_message = message.into();
        self
    }

    pub fn base(&self) -> &SettingBase<()> {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SettingBase<()> {
        &mut self.base
    }

    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    pub fn requires_confirmation(&self) -> bool {
        self.requires_confirmation
    }

    pub fn confirmation_message(&self) -> &str {
        &self.confirmation_message
    }

    pub fn on_fired<F>(&mut self, mut action: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        self.base.on_value_changed(move |_| action())
    }

    pub fn execute(&mut self) {
        tracing::debug!(key = self.base.key(), "trigger fired");
        self.base.pulse();
    }
}
