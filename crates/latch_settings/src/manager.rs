//! Settings registry
//!
//! Owns every category and setting, reconciles them with the persisted
//! snapshot and re-broadcasts changes.
//!
//! Lifecycle: `Built -> Loaded -> Ready -> Disposed`.
//! - **Built** (constructor): categories created by the definition, keys
//!   validated, index built, definition bindings and registry hooks attached.
//! - **Loaded** ([`SettingsManager::load`]): persisted values decoded into
//!   known settings.
//! - **Ready** ([`SettingsManager::start`]): every current value applied once.
//!
//! Every write goes through the registry by key. When a setting reports a
//! change, the registry emits `on_setting_changed(key)` and persists the full
//! snapshot before the mutating call returns. Persistence is only ever
//! triggered from that change path, with [`SettingsManager::save`] as the
//! explicit escape hatch. Dropping the registry disposes it.

use crate::category::Category;
use crate::definition::SettingsDefinition;
use crate::error::{SettingError, SettingsError};
use crate::setting::{ChoiceSetting, Setting, SettingValue, SliderSetting, TriggerSetting};
use crate::signal::{Signal, SubscriptionId};
use crate::snapshot::SettingsSnapshot;
use crate::storage::SettingsStorage;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Namespace the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "game_settings";

#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub storage_key: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Built,
    Loaded,
    Ready,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SettingAddress {
    category: usize,
    slot: usize,
}

pub struct SettingsManager {
    config: ManagerConfig,
    state: ManagerState,
    categories: Vec<Category>,
    index: HashMap<String, SettingAddress>,
    definition: Box<dyn SettingsDefinition>,
    storage: Box<dyn SettingsStorage>,
    /// Keys reported by settings since the last flush, in arrival order.
    pending: Rc<RefCell<VecDeque<String>>>,
    on_setting_changed: Signal<String>,
}

impl SettingsManager {
    pub fn new<D, S>(definition: D, storage: S) -> Result<Self, SettingsError>
    where
        D: SettingsDefinition + 'static,
        S: SettingsStorage + 'static,
    {
        Self::with_config(definition, storage, ManagerConfig::default())
    }

    pub fn with_config<D, S>(
        definition: D,
        storage: S,
        config: ManagerConfig,
    ) -> Result<Self, SettingsError>
    where
        D: SettingsDefinition + 'static,
        S: SettingsStorage + 'static,
    {
        let pending = Rc::new(RefCell::new(VecDeque::new()));

        let mut categories = definition.create_categories();
        let index = build_index(&categories)?;

        definition.bind_setting_actions(&mut categories);

        for setting in categories.iter_mut().flat_map(|c| c.settings_mut().iter_mut()) {
            let key = setting.key().to_string();
            let pending = Rc::clone(&pending);
            setting.on_setting_changed(move || pending.borrow_mut().push_back(key.clone()));
        }

        tracing::debug!(
            categories = categories.len(),
            settings = index.len(),
            "settings registry built"
        );

        Ok(Self {
            config,
            state: ManagerState::Built,
            categories,
            index,
            definition: Box::new(definition),
            storage: Box::new(storage),
            pending,
            on_setting_changed: Signal::new(),
        })
    }

    /// Load persisted values, then apply every current value once.
    pub fn start(&mut self) {
        self.load();
        self.apply_current_values();
        self.state = ManagerState::Ready;
        tracing::debug!("settings registry ready");
    }

    /// Resolves when the definition is ready for display.
    pub async fn wait_for_initialization(&self) {
        self.definition.wait_for_initialization().await;
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    /// Categories in tab order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name() == name)
    }

    /// Every setting, in category then declaration order.
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.categories.iter().flat_map(|category| category.settings())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Setting> {
        let address = self.index.get(key)?;
        self.categories
            .get(address.category)?
            .settings()
            .get(address.slot)
    }

    pub fn slider(&self, key: &str) -> Option<&SliderSetting> {
        self.get(key)?.as_slider()
    }

    pub fn choice(&self, key: &str) -> Option<&ChoiceSetting> {
        self.get(key)?.as_choice()
    }

    pub fn trigger(&self, key: &str) -> Option<&TriggerSetting> {
        self.get(key)?.as_trigger()
    }

    fn setting_mut(&mut self, key: &str) -> Result<&mut Setting, SettingsError> {
        let address = *self.index.get(key).ok_or_else(|| SettingsError::NotFound {
            key: key.to_string(),
        })?;
        Ok(&mut self.categories[address.category].settings_mut()[address.slot])
    }

    /// Write a value by key. Returns whether the value changed.
    pub fn set_value(&mut self, key: &str, value: SettingValue) -> Result<bool, SettingsError> {
        let changed = self.setting_mut(key)?.set_value(value)?;
        self.flush_changes();
        Ok(changed)
    }

    pub fn set_slider(&mut self, key: &str, value: f32) -> Result<bool, SettingsError> {
        self.set_value(key, SettingValue::Float(value))
    }

    pub fn set_choice(&mut self, key: &str, value: &str) -> Result<bool, SettingsError> {
        self.set_value(key, SettingValue::Text(value.to_string()))
    }

    /// Fire a trigger setting.
    pub fn execute(&mut self, key: &str) -> Result<(), SettingsError> {
        let setting = self.setting_mut(key)?;
        let kind = setting.kind();
        match setting.as_trigger_mut() {
            Some(trigger) => {
                trigger.execute();
                self.flush_changes();
                Ok(())
            }
            None => Err(SettingError::KindMismatch {
                key: key.to_string(),
                expected: "trigger",
                actual: kind.name(),
            }
            .into()),
        }
    }

    /// Run `f` against one setting, then propagate whatever it changed.
    pub fn update<R>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut Setting) -> R,
    ) -> Result<R, SettingsError> {
        let result = f(self.setting_mut(key)?);
        self.flush_changes();
        Ok(result)
    }

    /// Reset every setting to its default. Persistence follows from the change path.
    pub fn reset_all(&mut self) {
        for setting in self.settings_mut() {
            setting.reset_to_default();
        }
        self.flush_changes();
    }

    /// Subscribe to registry-level change notifications (the key of the changed setting).
    pub fn on_setting_changed<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut(&str) + 'static,
    {
        self.on_setting_changed
            .subscribe(move |key: &String| subscriber(key.as_str()))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.on_setting_changed.unsubscribe(id)
    }

    /// Serialize every setting into the persisted format.
    pub fn snapshot(&self) -> SettingsSnapshot {
        let mut snapshot = SettingsSnapshot::new();
        for setting in self.settings() {
            snapshot.set(setting.key(), setting.serialize_value());
        }
        snapshot
    }

    /// Persist the full snapshot. A failure is logged and reported, never fatal:
    /// in-memory values stay authoritative and the next change retries.
    pub fn save(&self) -> bool {
        let payload = match self.snapshot().to_json() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode settings snapshot");
                return false;
            }
        };

        let saved = self.storage.try_save(&self.config.storage_key, &payload);
        if saved {
            tracing::debug!(namespace = %self.config.storage_key, "settings saved");
        } else {
            tracing::error!(
                namespace = %self.config.storage_key,
                "settings could not be saved; retrying on next change"
            );
        }
        saved
    }

    /// Decode the persisted snapshot into known settings.
    ///
    /// Missing storage means defaults. Unknown keys are ignored, entries that
    /// fail to decode keep their prior value. Returns the number of entries applied.
    pub fn load(&mut self) -> usize {
        // Before Ready, values are restored silently: subscribers get their
        // initial state exactly once, from `apply_current_values`.
        let notify = self.state == ManagerState::Ready;
        let applied = self.load_snapshot(notify);

        if notify {
            self.flush_changes();
        } else if self.state == ManagerState::Built {
            self.state = ManagerState::Loaded;
        }
        applied
    }

    fn load_snapshot(&mut self, notify: bool) -> usize {
        let Some(payload) = self.storage.try_load(&self.config.storage_key) else {
            tracing::debug!(
                namespace = %self.config.storage_key,
                "no persisted settings; using defaults"
            );
            return 0;
        };

        let snapshot = match SettingsSnapshot::from_json(&payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable settings snapshot; using defaults");
                return 0;
            }
        };

        let mut applied = 0;
        for entry in snapshot.iter() {
            let Some(address) = self.index.get(&entry.key).copied() else {
                tracing::debug!(key = %entry.key, "ignoring persisted value for unknown setting");
                continue;
            };

            let setting = &mut self.categories[address.category].settings_mut()[address.slot];
            let result = if notify {
                setting.deserialize_value(&entry.value)
            } else {
                setting.restore_value(&entry.value)
            };
            match result {
                Ok(_) => applied += 1,
                Err(e) => tracing::warn!(error = %e, "keeping current value"),
            }
        }
        applied
    }

    /// Re-emit every current value so subscribers observe the initial state.
    pub fn apply_current_values(&mut self) {
        for setting in self.settings_mut() {
            setting.apply_current_value();
        }
        self.flush_changes();
    }

    /// Drop every subscription, ending the registry's lifetime. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == ManagerState::Disposed {
            return;
        }
        for setting in self.settings_mut() {
            setting.clear_subscribers();
        }
        self.on_setting_changed.clear();
        self.pending.borrow_mut().clear();
        self.state = ManagerState::Disposed;
        tracing::debug!("settings registry disposed");
    }

    fn settings_mut(&mut self) -> impl Iterator<Item = &mut Setting> {
        self.categories
            .iter_mut()
            .flat_map(|category| category.settings_mut().iter_mut())
    }

    /// Broadcast queued change notifications and persist once if any arrived.
    fn flush_changes(&mut self) {
        let mut changed = false;
        loop {
            // The queue borrow ends before emit.
            let Some(key) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            tracing::debug!(key = %key, "setting changed");
            self.on_setting_changed.emit(&key);
            changed = true;
        }
        if changed {
            self.save();
        }
    }
}

impl Drop for SettingsManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn build_index(categories: &[Category]) -> Result<HashMap<String, SettingAddress>, SettingsError> {
    let mut names = HashSet::new();
    let mut index = HashMap::new();

    for (category_index, category) in categories.iter().enumerate() {
        if !names.insert(category.name()) {
            return Err(SettingsError::DuplicateCategory {
                name: category.name().to_string(),
            });
        }

        for (slot, setting) in category.settings().iter().enumerate() {
            let key = setting.key();
            if key.is_empty() {
                return Err(SettingsError::EmptyKey {
                    category: category.name().to_string(),
                });
            }
            if index.contains_key(key) {
                return Err(SettingsError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            index.insert(
                key.to_string(),
                SettingAddress {
                    category: category_index,
                    slot,
                },
            );
        }
    }

    Ok(index)
}
