//! Settings view
//!
//! Holds the controls built from the latest display snapshot, tracks which
//! category is shown and which control has focus, and turns player input into
//! [`UiEvent`]s. It never touches settings directly.

use crate::display::CategoryDisplayData;
use crate::event::UiEvent;
use crate::items::SettingItem;
use crate::navigation::{ControlId, Direction, NavigationGraph, NavigationLayout};
use latch_services::input::DEAD_ZONE;

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Close,
    Tab { category: String },
    Setting { category: usize, item: SettingItem },
}

/// Identity of a control that survives a rebuild.
#[derive(Debug, Clone, PartialEq)]
enum FocusKey {
    Close,
    Tab(String),
    Setting(String),
}

#[derive(Debug)]
pub struct SettingsView {
    categories: Vec<String>,
    controls: Vec<Control>,
    close: ControlId,
    tabs: Vec<ControlId>,
    /// Setting controls per category, in display order.
    elements: Vec<Vec<ControlId>>,
    current: Option<usize>,
    focus: Option<ControlId>,
    graph: NavigationGraph,
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsView {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            controls: vec![Control::Close],
            close: ControlId::new(0),
            tabs: Vec::new(),
            elements: Vec::new(),
            current: None,
            focus: None,
            graph: NavigationGraph::new(),
        }
    }

    /// Rebuild every control from a fresh snapshot.
    ///
    /// The displayed category is kept if it still exists, otherwise the first
    /// one is shown. Focus follows the same control when it is still visible.
    pub fn set_categories(&mut self, data: Vec<CategoryDisplayData>) {
        let previous_category = self.current_category().map(str::to_string);
        let previous_focus = self.focus.and_then(|id| self.focus_key(id));

        self.controls.truncate(1);
        self.tabs.clear();
        self.elements.clear();
        self.current = None;
        self.focus = None;

        self.categories = data.iter().map(|c| c.name.clone()).collect();

        if data.len() > 1 {
            for category in &data {
                let id = self.allocate(Control::Tab {
                    category: category.name.clone(),
                });
                self.tabs.push(id);
            }
        }

        for (index, category) in data.iter().enumerate() {
            let ids = category
                .settings
                .iter()
                .map(|setting| {
                    self.allocate(Control::Setting {
                        category: index,
                        item: SettingItem::from_display(setting),
                    })
                })
                .collect();
            self.elements.push(ids);
        }

        if !self.categories.is_empty() {
            let target = previous_category
                .and_then(|name| self.category_index(&name))
                .unwrap_or(0);
            self.current = Some(target);
        }

        self.rebuild_navigation();

        self.focus = previous_focus
            .and_then(|key| self.find_visible(&key))
            .or_else(|| self.default_focus());

        tracing::debug!(
            categories = self.categories.len(),
            controls = self.controls.len(),
            current = self.current_category().unwrap_or(""),
            "settings view rebuilt"
        );
    }

    fn allocate(&mut self, control: Control) -> ControlId {
        let id = ControlId::new(self.controls.len() as u32);
        self.controls.push(control);
        id
    }

    /// Show another category. Returns false if it is unknown or already shown.
    pub fn switch_category(&mut self, name: &str) -> bool {
        let Some(index) = self.category_index(name) else {
            tracing::warn!(category = name, "unknown settings category");
            return false;
        };
        if self.current == Some(index) {
            return false;
        }

        self.current = Some(index);
        self.rebuild_navigation();

        if !self.focus.is_some_and(|id| self.is_visible(id)) {
            self.focus = self.default_focus();
        }
        true
    }

    fn rebuild_navigation(&mut self) {
        let layout = NavigationLayout {
            tabs: self.tabs.clone(),
            active_tab: self.current.and_then(|index| self.tabs.get(index).copied()),
            close: Some(self.close),
            elements: self.visible_elements().to_vec(),
        };
        self.graph = NavigationGraph::build(&layout);
    }

    fn category_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.categories.get(index))
            .map(String::as_str)
    }

    pub fn navigation(&self) -> &NavigationGraph {
        &self.graph
    }

    pub fn close_control(&self) -> ControlId {
        self.close
    }

    pub fn tabs(&self) -> &[ControlId] {
        &self.tabs
    }

    pub fn tab_for(&self, category: &str) -> Option<ControlId> {
        self.category_index(category)
            .and_then(|index| self.tabs.get(index).copied())
    }

    /// Setting controls of the displayed category.
    pub fn visible_elements(&self) -> &[ControlId] {
        self.current
            .and_then(|index| self.elements.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first_setting_item(&self) -> Option<ControlId> {
        self.visible_elements().first().copied()
    }

    /// Control id of the setting `key` in the displayed category.
    pub fn control_for(&self, key: &str) -> Option<ControlId> {
        self.visible_elements()
            .iter()
            .copied()
            .find(|&id| matches!(self.control(id), Some(Control::Setting { item, .. }) if item.key() == key))
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.raw() as usize)
    }

    pub fn is_visible(&self, id: ControlId) -> bool {
        match self.control(id) {
            Some(Control::Close) | Some(Control::Tab { .. }) => true,
            Some(Control::Setting { category, .. }) => self.current == Some(*category),
            None => false,
        }
    }

    pub fn focus(&self) -> Option<ControlId> {
        self.focus
    }

    /// Focus a visible control. Returns false for hidden or unknown ids.
    pub fn set_focus(&mut self, id: ControlId) -> bool {
        if self.is_visible(id) {
            self.focus = Some(id);
            true
        } else {
            false
        }
    }

    /// Follow the navigation link from the focused control.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(current) = self.focus else {
            self.focus = self.default_focus();
            return self.focus.is_some();
        };

        match self.graph.neighbor(current, direction) {
            Some(next) => {
                self.focus = Some(next);
                true
            }
            None => false,
        }
    }

    /// Route horizontal input to the focused control. Tabs move along the tab row.
    pub fn navigate_horizontal(&mut self, direction: f32) -> Option<UiEvent> {
        let focus = self.focus?;
        if matches!(self.control(focus), Some(Control::Tab { .. })) {
            if direction.is_finite() && direction.abs() >= DEAD_ZONE {
                let towards = if direction > 0.0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
                self.move_focus(towards);
            }
            return None;
        }

        match self.controls.get_mut(focus.raw() as usize)? {
            Control::Setting { item, .. } => item.navigate_horizontal(direction),
            Control::Tab { .. } | Control::Close => None,
        }
    }

    pub fn submit(&mut self) -> Option<UiEvent> {
        let focus = self.focus?;
        match self.controls.get_mut(focus.raw() as usize)? {
            Control::Setting { item, .. } => item.submit(),
            Control::Tab { category } => Some(UiEvent::CategorySwitchRequested {
                name: category.clone(),
            }),
            Control::Close => Some(UiEvent::CloseRequested),
        }
    }

    fn default_focus(&self) -> Option<ControlId> {
        self.first_setting_item()
            .or_else(|| self.current.and_then(|index| self.tabs.get(index).copied()))
            .or(Some(self.close))
    }

    fn focus_key(&self, id: ControlId) -> Option<FocusKey> {
        match self.control(id)? {
            Control::Close => Some(FocusKey::Close),
            Control::Tab { category } => Some(FocusKey::Tab(category.clone())),
            Control::Setting { item, .. } => Some(FocusKey::Setting(item.key().to_string())),
        }
    }

    fn find_visible(&self, key: &FocusKey) -> Option<ControlId> {
        match key {
            FocusKey::Close => Some(self.close),
            FocusKey::Tab(category) => self.tab_for(category),
            FocusKey::Setting(setting) => self.control_for(setting),
        }
    }
}
