//! Latch UI
//!
//! Settings menu front end:
//! - Display records taken from the settings registry
//! - Controls that own their left/right input
//! - Focus navigation graph over tabs, setting controls and the close control
//! - The view, and the presenter that connects it to the registry

pub mod dialog;
pub mod display;
pub mod event;
pub mod items;
pub mod navigation;
pub mod presenter;
pub mod view;

pub use dialog::{AutoConfirm, ConfirmationDialog, CANCEL_LABEL, CONFIRM_LABEL};
pub use display::{CategoryDisplayData, SettingDisplayData, SettingDisplayKind};
pub use event::UiEvent;
pub use items::{SettingItem, SLIDER_STEP};
pub use navigation::{Axis, ControlId, Direction, NavigationGraph, NavigationLayout, Neighbors};
pub use presenter::SettingsPresenter;
pub use view::{Control, SettingsView};
