//! Reusable UI components.

mod confirm_dialog;
mod help_bar;
mod input;
mod loading;
mod notification;

pub use confirm_dialog::{centered_rect, ConfirmAction, ConfirmDialog, DialogContext};
pub use help_bar::render_context_help;
pub use input::{InputMode, TextInput};
pub use loading::LoadingIndicator;
pub use notification::NotificationManager;
