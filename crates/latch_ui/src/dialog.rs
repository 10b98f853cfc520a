use async_trait::async_trait;

pub const CONFIRM_LABEL: &str = "Execute";
pub const CANCEL_LABEL: &str = "Cancel";

/// Modal yes/no prompt shown before destructive triggers run.
#[async_trait(?Send)]
pub trait ConfirmationDialog {
    /// Show `message` and wait for the player's answer. True means confirmed.
    async fn show_dialog(&self, message: &str, confirm_label: &str, cancel_label: &str) -> bool;
}

/// Dialog that answers every prompt the same way without asking.
///
/// For headless runs and tools where nobody is there to click.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm {
    answer: bool,
}

impl AutoConfirm {
    pub fn accept() -> Self {
        Self { answer: true }
    }

    pub fn decline() -> Self {
        Self { answer: false }
    }
}

#[async_trait(?Send)]
impl ConfirmationDialog for AutoConfirm {
    async fn show_dialog(&self, message: &str, _confirm_label: &str, _cancel_label: &str) -> bool {
        tracing::info!(message, answer = self.answer, "confirmation answered automatically");
        self.answer
    }
}
