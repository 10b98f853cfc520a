//! Latch Engine Runtime
//!
//! Minimal binary that boots services and the settings menu, then drives the
//! menu with a scripted input sequence.

mod config;
mod game_settings;

use anyhow::Result;
use config::RuntimeConfig;
use game_settings::GameSettingsDefinition;
use latch_services::InputState;
use latch_settings::SettingsManager;
use latch_ui::{AutoConfirm, SettingsPresenter};
use std::rc::Rc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = RuntimeConfig::from_env();
    tracing::info!("{} v{}", config.window_title, latch_core::VERSION);

    tracing::info!("Initializing services...");
    let storage = Rc::new(latch_services::init_services(config.settings_dir.clone()));

    let definition = GameSettingsDefinition::new(Rc::clone(&storage));
    let reset_requested = definition.reset_requested();
    let mut manager = SettingsManager::new(definition, Rc::clone(&storage))?;
    manager.on_setting_changed(|key| tracing::debug!(key, "setting changed"));

    let mut presenter = SettingsPresenter::new(manager, AutoConfirm::accept());
    presenter.on_show_requested(|| tracing::info!("settings menu opened"));
    presenter.on_hide_requested(|| tracing::info!("settings menu closed"));
    presenter.initialize().await;

    for frame in scripted_frames() {
        for input in frame.menu_inputs() {
            presenter.handle_input(input).await;

            if reset_requested.take() {
                presenter.manager_mut().reset_all();
                presenter.refresh_view();
                tracing::info!("settings reset to defaults");
            }
        }
    }

    for setting in presenter.manager().settings() {
        tracing::info!(key = setting.key(), value = %setting.serialize_value(), "final value");
    }

    presenter.dispose();
    tracing::info!("Runtime shut down cleanly");
    Ok(())
}

/// Open the menu, nudge the master volume, switch to Graphics and cycle the
/// quality, reset everything from the Data tab, then close.
fn scripted_frames() -> Vec<InputState> {
    vec![
        InputState::toggle(),
        InputState::horizontal(1.0),
        InputState::horizontal(1.0),
        InputState::vertical(1.0),
        InputState::horizontal(1.0),
        InputState::submit(),
        InputState::vertical(-1.0),
        InputState::horizontal(-1.0),
        InputState::vertical(1.0),
        InputState::horizontal(1.0),
        InputState::submit(),
        InputState::vertical(-1.0),
        InputState::submit(),
        InputState::toggle(),
    ]
}
