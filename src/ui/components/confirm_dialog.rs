//! Typed-confirmation dialog for destructive actions.
//!
//! The dialog owns only presentation state: the text input and the spinner.
//! Whether the typed text is valid, and what gets deleted, is decided by the
//! [`SelectionController`](crate::selection::SelectionController).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::selection::PendingDeletion;
use crate::ui::components::{LoadingIndicator, TextInput};
use crate::ui::theme::theme;

/// Actions that can be returned from the confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// The typed text changed.
    InputChanged(String),
    /// The user pressed Enter.
    Confirm,
    /// The user dismissed the dialog.
    Cancel,
}

/// What the dialog needs to know to render itself.
#[derive(Debug, Clone, Copy)]
pub struct DialogContext<'a> {
    /// The deletion being confirmed.
    pub pending: &'a PendingDeletion,
    /// Number of selected rows, used in the bulk message.
    pub selected_count: usize,
    /// Whether the typed text matches the required phrase.
    pub valid: bool,
    /// Whether the confirmed deletion is in flight.
    pub deleting: bool,
}

/// Confirmation dialog with a text input and Cancel/Delete buttons.
#[derive(Debug)]
pub struct ConfirmDialog {
    input: TextInput,
    spinner: LoadingIndicator,
}

impl ConfirmDialog {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
            spinner: LoadingIndicator::with_message("Deleting..."),
        }
    }

    /// Prepare the dialog for a new pending deletion.
    pub fn open(&mut self, pending: &PendingDeletion) {
        self.input.clear();
        self.input.set_placeholder(pending.required_phrase());
        self.spinner.stop();
    }

    /// Reset after the dialog closes.
    pub fn close(&mut self) {
        self.input.clear();
        self.spinner.stop();
    }

    /// Switch to the in-flight state.
    pub fn start_deleting(&mut self) {
        self.spinner.start();
    }

    /// Advance the spinner. Called on each tick.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    /// Handle keyboard input for the dialog.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ConfirmAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(ConfirmAction::Cancel),
            (KeyCode::Enter, KeyModifiers::NONE) => Some(ConfirmAction::Confirm),
            _ => {
                if self.input.handle_input(key) {
                    Some(ConfirmAction::InputChanged(self.input.value().to_string()))
                } else {
                    None
                }
            }
        }
    }

    /// Render the dialog centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: DialogContext<'_>) {
        let t = theme();

        let dialog_width = 60.min(area.width.saturating_sub(4));
        let dialog_height = 13.min(area.height.saturating_sub(2));
        let dialog_area = centered_rect(dialog_width, dialog_height, area);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", dialog_title(ctx.pending)))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.danger));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Message
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        let message = Paragraph::new(dialog_message(ctx.pending, ctx.selected_count))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        frame.render_widget(Paragraph::new(prompt_line(ctx.pending)), chunks[1]);

        self.input.render(frame, chunks[2], None, !ctx.deleting);

        if ctx.deleting {
            self.spinner.render(frame, chunks[4]);
        } else {
            let paragraph = Paragraph::new(button_line(ctx.valid)).alignment(Alignment::Center);
            frame.render_widget(paragraph, chunks[4]);
        }
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialog title for a pending deletion.
pub fn dialog_title(pending: &PendingDeletion) -> &'static str {
    match pending {
        PendingDeletion::Single(_) => "Delete Item",
        PendingDeletion::Bulk => "Delete Multiple/Single Item(s)",
    }
}

/// Explanation shown above the prompt.
pub fn dialog_message(pending: &PendingDeletion, selected_count: usize) -> String {
    match pending {
        PendingDeletion::Single(row) => format!(
            "You are about to delete \"{}\". Restart to restore the sample data.",
            row.name
        ),
        PendingDeletion::Bulk => format!(
            "You are about to delete {} item(s). Restart to restore the sample data.",
            selected_count
        ),
    }
}

fn prompt_line(pending: &PendingDeletion) -> Line<'static> {
    let t = theme();
    let phrase = match pending {
        PendingDeletion::Single(row) => format!("\"{}\"", row.name),
        PendingDeletion::Bulk => pending.required_phrase().to_string(),
    };
    Line::from(vec![
        Span::raw("Type "),
        Span::styled(phrase, Style::default().fg(t.warning).add_modifier(Modifier::BOLD)),
        Span::raw(" to confirm"),
    ])
}

fn button_line(valid: bool) -> Line<'static> {
    let t = theme();
    let delete_style = if valid {
        Style::default().fg(t.danger).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.dim).add_modifier(Modifier::DIM)
    };
    Line::from(vec![
        Span::styled("[ Esc: Cancel ]", Style::default().fg(t.fg)),
        Span::raw("    "),
        Span::styled("[ Enter: Delete ]", delete_style),
    ])
}

/// Create a centered rectangle.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
