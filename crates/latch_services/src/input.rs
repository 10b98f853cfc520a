//! Input abstraction: raw per-frame state and the menu intents derived from it

/// Stick deflection below this magnitude is treated as no input.
pub const DEAD_ZONE: f32 = 0.1;

/// Raw input sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub move_x: f32,
    pub move_y: f32,
    pub submit: bool,
    pub toggle_settings: bool,
}

impl InputState {
    pub fn horizontal(x: f32) -> Self {
        Self {
            move_x: x,
            ..Self::default()
        }
    }

    pub fn vertical(y: f32) -> Self {
        Self {
            move_y: y,
            ..Self::default()
        }
    }

    pub fn submit() -> Self {
        Self {
            submit: true,
            ..Self::default()
        }
    }

    pub fn toggle() -> Self {
        Self {
            toggle_settings: true,
            ..Self::default()
        }
    }

    /// Menu intents for this frame, in handling order.
    ///
    /// Positive `move_y` is up. Only the dominant axis produces movement.
    pub fn menu_inputs(&self) -> Vec<MenuInput> {
        let mut inputs = Vec::new();

        if self.toggle_settings {
            inputs.push(MenuInput::ToggleSettings);
        }

        let x = finite_or_zero(self.move_x);
        let y = finite_or_zero(self.move_y);
        if x.abs() >= y.abs() {
            if x.abs() >= DEAD_ZONE {
                inputs.push(MenuInput::Horizontal(x));
            }
        } else if y.abs() >= DEAD_ZONE {
            inputs.push(if y > 0.0 {
                MenuInput::Up
            } else {
                MenuInput::Down
            });
        }

        if self.submit {
            inputs.push(MenuInput::Submit);
        }
        inputs
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Menu-level intent consumed by the settings presenter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuInput {
    /// Signed horizontal deflection, already outside the dead zone.
    Horizontal(f32),
    Up,
    Down,
    Submit,
    ToggleSettings,
}
