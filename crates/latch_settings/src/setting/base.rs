use crate::signal::{Signal, SubscriptionId};

/// State and notifications shared by every setting variant.
///
/// Holds the identity (key), presentation metadata, the current/default value
/// pair and two signals:
/// - `value_changed` carries the new typed value,
/// - `setting_changed` is an untyped "something changed" pulse, which is what
///   the registry listens to.
#[derive(Debug)]
pub struct SettingBase<T> {
    key: String,
    display_name: String,
    description: String,
    current: T,
    default: T,
    value_changed: Signal<T>,
    setting_changed: Signal<()>,
}

impl<T: Clone + PartialEq> SettingBase<T> {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        default: T,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: description.into(),
            current: default.clone(),
            default,
            value_changed: Signal::new(),
            setting_changed: Signal::new(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.current
    }

    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Store `value` and notify, unless it equals the current value.
    ///
    /// Variants validate or clamp before calling this.
    pub(crate) fn replace(&mut self, value: T) -> bool {
        if self.current == value {
            return false;
        }
        self.current = value;
        self.notify();
        true
    }

    /// Store `value` without notifying. Used when restoring persisted state
    /// before the initial apply.
    pub(crate) fn restore(&mut self, value: T) -> bool {
        if self.current == value {
            return false;
        }
        self.current = value;
        true
    }

    pub(crate) fn reset(&mut self) -> bool {
        let default = self.default.clone();
        self.replace(default)
    }

    /// Emit both signals with the current value, without a change check.
    pub(crate) fn notify(&mut self) {
        self.value_changed.emit(&self.current);
        self.setting_changed.emit(&());
    }

    /// Emit only the typed value signal.
    pub(crate) fn pulse(&mut self) {
        self.value_changed.emit(&self.current);
    }

    pub fn on_value_changed<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        self.value_changed.subscribe(subscriber)
    }

    pub fn on_setting_changed<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        self.setting_changed.subscribe(move |_| subscriber())
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.value_changed.unsubscribe(id) || self.setting_changed.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.value_changed.len() + self.setting_changed.len()
    }

    pub fn clear_subscribers(&mut self) {
        self.value_changed.clear();
        self.setting_changed.clear();
    }
}
