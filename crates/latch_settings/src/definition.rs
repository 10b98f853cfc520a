//! Project-side settings definition
//!
//! A game declares its categories and wires setting changes into engine
//! subsystems (audio mixer, resolution switch, ...) by implementing
//! [`SettingsDefinition`]. The registry calls it exactly once, at build time.

use crate::category::Category;
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait SettingsDefinition {
    /// Resolve once the definition is ready to be displayed (localization
    /// tables loaded, etc.). Awaited by the presenter before the first refresh.
    async fn wait_for_initialization(&self) {}

    /// Declare the categories, in tab order.
    fn create_categories(&self) -> Vec<Category>;

    /// Subscribe engine subsystems to setting changes and attach trigger actions.
    ///
    /// Subscriptions live as long as the registry; they are cleared when it is
    /// disposed.
    fn bind_setting_actions(&self, _categories: &mut [Category]) {}
}
