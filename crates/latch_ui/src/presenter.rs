//! Settings presenter
//!
//! Bridges the registry and the view: pushes display snapshots into the view,
//! applies view events back to the registry by key, asks for confirmation
//! before flagged triggers run, and raises show/hide requests for whoever
//! owns the window.

use crate::dialog::{ConfirmationDialog, CANCEL_LABEL, CONFIRM_LABEL};
use crate::display;
use crate::event::UiEvent;
use crate::navigation::Direction;
use crate::view::SettingsView;
use latch_services::input::MenuInput;
use latch_settings::{ManagerState, SettingsError, SettingsManager, Signal, SubscriptionId};

pub struct SettingsPresenter {
    manager: SettingsManager,
    view: SettingsView,
    dialog: Box<dyn ConfirmationDialog>,
    open: bool,
    gameplay_active: bool,
    on_show_requested: Signal<()>,
    on_hide_requested: Signal<()>,
}

impl SettingsPresenter {
    pub fn new<D>(manager: SettingsManager, dialog: D) -> Self
    where
        D: ConfirmationDialog + 'static,
    {
        Self {
            manager,
            view: SettingsView::new(),
            dialog: Box::new(dialog),
            open: false,
            gameplay_active: false,
            on_show_requested: Signal::new(),
            on_hide_requested: Signal::new(),
        }
    }

    /// Wait for the definition, start the registry if nobody has yet, then
    /// build the view.
    pub async fn initialize(&mut self) {
        self.manager.wait_for_initialization().await;
        if self.manager.state() == ManagerState::Built {
            self.manager.start();
        }
        self.refresh_view();
        tracing::info!(settings = self.manager.len(), "settings presenter initialized");
    }

    /// Push a fresh snapshot of the registry into the view.
    pub fn refresh_view(&mut self) {
        let data = display::collect_categories(self.manager.categories(), !self.gameplay_active);
        self.view.set_categories(data);
    }

    pub fn request_show(&mut self) {
        self.refresh_view();
        self.open = true;
        self.on_show_requested.emit(&());
    }

    pub fn request_hide(&mut self) {
        self.open = false;
        self.on_hide_requested.emit(&());
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.request_hide();
        } else {
            self.request_show();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// While gameplay is active, restricted categories are not displayed.
    pub fn set_gameplay_active(&mut self, active: bool) {
        if self.gameplay_active == active {
            return;
        }
        self.gameplay_active = active;
        self.refresh_view();
    }

    pub fn is_gameplay_active(&self) -> bool {
        self.gameplay_active
    }

    pub fn on_show_requested<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        self.on_show_requested.subscribe(move |_| subscriber())
    }

    pub fn on_hide_requested<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        self.on_hide_requested.subscribe(move |_| subscriber())
    }

    /// Apply one view event.
    ///
    /// A rejected write resynchronizes the view with the registry before the
    /// error is returned.
    pub async fn handle_event(&mut self, event: UiEvent) -> Result<(), SettingsError> {
        let result = match event {
            UiEvent::SliderCommitted { key, value } => {
                self.manager.set_slider(&key, value).map(|_| ())
            }
            UiEvent::ChoiceCommitted { key, value } => {
                self.manager.set_choice(&key, &value).map(|_| ())
            }
            UiEvent::TriggerFired { key } => self.fire_trigger(&key).await,
            UiEvent::CategorySwitchRequested { name } => {
                self.view.switch_category(&name);
                Ok(())
            }
            UiEvent::CloseRequested => {
                self.request_hide();
                Ok(())
            }
        };

        if result.is_err() {
            self.refresh_view();
        }
        result
    }

    async fn fire_trigger(&mut self, key: &str) -> Result<(), SettingsError> {
        let confirmation = self
            .manager
            .trigger(key)
            .filter(|trigger| trigger.requires_confirmation())
            .map(|trigger| trigger.confirmation_message().to_string());

        if let Some(message) = confirmation {
            let confirmed = self
                .dialog
                .show_dialog(&message, CONFIRM_LABEL, CANCEL_LABEL)
                .await;
            if !confirmed {
                tracing::debug!(key, "trigger cancelled");
                return Ok(());
            }
        }

        self.manager.execute(key)?;
        // Trigger actions may have rewritten other settings.
        self.refresh_view();
        Ok(())
    }

    /// Route one menu intent. Everything except the toggle is ignored while
    /// the menu is closed. Rejected writes are logged, never propagated.
    pub async fn handle_input(&mut self, input: MenuInput) {
        let event = match input {
            MenuInput::ToggleSettings => {
                self.toggle();
                None
            }
            _ if !self.open => None,
            MenuInput::Horizontal(direction) => self.view.navigate_horizontal(direction),
            MenuInput::Up => {
                self.view.move_focus(Direction::Up);
                None
            }
            MenuInput::Down => {
                self.view.move_focus(Direction::Down);
                None
            }
            MenuInput::Submit => self.view.submit(),
        };

        if let Some(event) = event {
            if let Err(e) = self.handle_event(event).await {
                tracing::warn!(error = %e, "settings input rejected");
            }
        }
    }

    pub fn manager(&self) -> &SettingsManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SettingsManager {
        &mut self.manager
    }

    pub fn view(&self) -> &SettingsView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SettingsView {
        &mut self.view
    }

    pub fn dispose(&mut self) {
        self.on_show_requested.clear();
        self.on_hide_requested.clear();
        self.manager.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use latch_services::MemoryStorage;
    use latch_settings::{
        Category, ChoiceSetting, Setting, SettingsDefinition, SettingsStorage, SliderSetting,
        TriggerSetting,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct GameDefinition {
        deleted: Rc<Cell<u32>>,
    }

    impl SettingsDefinition for GameDefinition {
        fn create_categories(&self) -> Vec<Category> {
            vec![
                Category::new(
                    "Audio",
                    [SliderSetting::new("volume", "Volume", "", 0.8, 0.0, 1.0).unwrap()],
                ),
                Category::new(
                    "Graphics",
                    [ChoiceSetting::new("quality", "Quality", "", ["Low", "Med", "High"], "Med")
                        .unwrap()],
                ),
                Category::new(
                    "Data",
                    [TriggerSetting::new("delete_save", "Delete Save", "", "Delete")
                        .with_confirmation("Delete all save data?")],
                )
                .restricted(),
            ]
        }

        fn bind_setting_actions(&self, categories: &mut [Category]) {
            let deleted = Rc::clone(&self.deleted);
            if let Some(trigger) = categories
                .iter_mut()
                .find_map(|c| c.get_mut("delete_save"))
                .and_then(Setting::as_trigger_mut)
            {
                trigger.on_fired(move || deleted.set(deleted.get() + 1));
            }
        }
    }

    struct RecordingDialog {
        answer: bool,
        messages: Rc<RefCell<Vec<String>>>,
    }

    #[async_trait(?Send)]
    impl ConfirmationDialog for RecordingDialog {
        async fn show_dialog(&self, message: &str, confirm_label: &str, _cancel: &str) -> bool {
            assert_eq!(confirm_label, CONFIRM_LABEL);
            self.messages.borrow_mut().push(message.to_string());
            self.answer
        }
    }

    struct Fixture {
        presenter: SettingsPresenter,
        storage: Rc<MemoryStorage>,
        deleted: Rc<Cell<u32>>,
        messages: Rc<RefCell<Vec<String>>>,
    }

    fn fixture(answer: bool) -> Fixture {
        let storage = Rc::new(MemoryStorage::new());
        let deleted = Rc::new(Cell::new(0));
        let messages = Rc::new(RefCell::new(Vec::new()));
        let manager = SettingsManager::new(
            GameDefinition {
                deleted: Rc::clone(&deleted),
            },
            Rc::clone(&storage),
        )
        .unwrap();
        let mut presenter = SettingsPresenter::new(
            manager,
            RecordingDialog {
                answer,
                messages: Rc::clone(&messages),
            },
        );
        pollster::block_on(presenter.initialize());

        Fixture {
            presenter,
            storage,
            deleted,
            messages,
        }
    }

    #[test]
    fn test_initialize_starts_manager_and_builds_view() {
        let f = fixture(true);
        assert_eq!(f.presenter.manager().state(), ManagerState::Ready);
        assert_eq!(f.presenter.view().categories(), ["Audio", "Graphics", "Data"]);
        assert_eq!(f.presenter.view().current_category(), Some("Audio"));
        assert!(!f.presenter.is_open());
    }

    #[test]
    fn test_slider_input_writes_through_manager() {
        let mut f = fixture(true);
        pollster::block_on(f.presenter.handle_input(MenuInput::ToggleSettings));
        assert!(f.presenter.is_open());

        pollster::block_on(f.presenter.handle_input(MenuInput::Horizontal(1.0)));
        let volume = f.presenter.manager().slider("volume").unwrap().value();
        assert!((volume - 0.85).abs() < 1e-6);

        let saved = f.storage.try_load("game_settings").unwrap();
        assert!(saved.contains("volume"));
    }

    #[test]
    fn test_input_ignored_while_closed() {
        let mut f = fixture(true);
        let persisted = f.storage.try_load("game_settings");
        pollster::block_on(f.presenter.handle_input(MenuInput::Horizontal(1.0)));
        assert_eq!(f.presenter.manager().slider("volume").unwrap().value(), 0.8);
        assert_eq!(f.storage.try_load("game_settings"), persisted);
    }

    #[test]
    fn test_category_switch_via_tab_then_choice_submit() {
        let mut f = fixture(true);
        f.presenter.request_show();

        pollster::block_on(async {
            f.presenter.handle_input(MenuInput::Up).await;
            f.presenter.handle_input(MenuInput::Horizontal(1.0)).await;
            f.presenter.handle_input(MenuInput::Submit).await;
        });
        assert_eq!(f.presenter.view().current_category(), Some("Graphics"));

        pollster::block_on(async {
            f.presenter.handle_input(MenuInput::Down).await;
            f.presenter.handle_input(MenuInput::Submit).await;
        });
        assert_eq!(f.presenter.manager().choice("quality").unwrap().value(), "High");
    }

    #[test]
    fn test_confirmed_trigger_runs() {
        let mut f = fixture(true);
        let event = UiEvent::TriggerFired {
            key: "delete_save".into(),
        };
        pollster::block_on(f.presenter.handle_event(event)).unwrap();

        assert_eq!(f.deleted.get(), 1);
        assert_eq!(*f.messages.borrow(), ["Delete all save data?"]);
    }

    #[test]
    fn test_cancelled_trigger_does_not_run() {
        let mut f = fixture(false);
        let event = UiEvent::TriggerFired {
            key: "delete_save".into(),
        };
        pollster::block_on(f.presenter.handle_event(event)).unwrap();

        assert_eq!(f.deleted.get(), 0);
        assert_eq!(f.messages.borrow().len(), 1);
    }

    #[test]
    fn test_rejected_write_reports_error() {
        let mut f = fixture(true);
        let event = UiEvent::ChoiceCommitted {
            key: "quality".into(),
            value: "Ultra".into(),
        };
        let result = pollster::block_on(f.presenter.handle_event(event));
        assert!(matches!(result, Err(SettingsError::Setting(_))));

        let event = UiEvent::SliderCommitted {
            key: "missing".into(),
            value: 0.5,
        };
        let result = pollster::block_on(f.presenter.handle_event(event));
        assert!(matches!(result, Err(SettingsError::NotFound { .. })));
        assert_eq!(f.presenter.manager().choice("quality").unwrap().value(), "Med");
    }

    #[test]
    fn test_gameplay_hides_restricted_categories() {
        let mut f = fixture(true);
        f.presenter.set_gameplay_active(true);
        assert_eq!(f.presenter.view().categories(), ["Audio", "Graphics"]);

        f.presenter.set_gameplay_active(false);
        assert_eq!(f.presenter.view().categories().len(), 3);
    }

    #[test]
    fn test_show_hide_signals() {
        let mut f = fixture(true);
        let log = Rc::new(RefCell::new(Vec::new()));
        let shown = Rc::clone(&log);
        let hidden = Rc::clone(&log);
        f.presenter.on_show_requested(move || shown.borrow_mut().push("show"));
        f.presenter.on_hide_requested(move || hidden.borrow_mut().push("hide"));

        f.presenter.request_show();
        pollster::block_on(f.presenter.handle_event(UiEvent::CloseRequested)).unwrap();
        pollster::block_on(f.presenter.handle_input(MenuInput::ToggleSettings));

        assert_eq!(*log.borrow(), ["show", "hide", "show"]);
        assert!(f.presenter.is_open());
    }

    #[test]
    fn test_dispose_clears_subscribers() {
        let mut f = fixture(true);
        f.presenter.dispose();
        assert_eq!(f.presenter.manager().state(), ManagerState::Disposed);
    }
}
