/// Something the player did in the settings view.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SliderCommitted { key: String, value: f32 },
    ChoiceCommitted { key: String, value: String },
    TriggerFired { key: String },
    CategorySwitchRequested { name: String },
    CloseRequested,
}
