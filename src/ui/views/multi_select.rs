//! Multi-select table with typed-confirmation deletes.
//!
//! The view never owns the rows. It reads them on every call and reports a
//! replacement collection through [`MultiSelectAction::DataChanged`] once a
//! deletion completes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use tracing::{debug, trace};

use crate::data::Row;
use crate::selection::{DeleteRequest, SelectionController};
use crate::ui::components::{ConfirmAction, ConfirmDialog, DialogContext};
use crate::ui::theme::theme;

/// Actions that can be returned from the multi-select view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSelectAction {
    /// A deletion was confirmed and should be executed.
    StartDelete(DeleteRequest),
    /// Bulk delete was requested with nothing selected.
    NothingSelected,
    /// A deletion finished; this is the complete new row collection.
    DataChanged(Vec<Row>),
}

/// The multi-select table view.
#[derive(Debug, Default)]
pub struct MultiSelectView {
    controller: SelectionController,
    dialog: ConfirmDialog,
    /// Index of the highlighted row.
    cursor: usize,
}

impl MultiSelectView {
    /// Create a view with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection controller.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Index of the highlighted row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the confirmation dialog is open and capturing input.
    pub fn is_dialog_open(&self) -> bool {
        self.controller.is_dialog_open()
    }

    /// Advance the dialog spinner.
    pub fn tick(&mut self) {
        self.dialog.tick();
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, rows: &[Row]) -> Option<MultiSelectAction> {
        trace!(code = ?key.code, "Multi-select key");
        if self.controller.is_dialog_open() {
            return self.handle_dialog_input(key);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (KeyCode::Char(' '), _) => {
                if let Some(row) = rows.get(self.cursor) {
                    self.controller.toggle(&row.id);
                }
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => self.controller.toggle_all(rows),
            (KeyCode::Char('c'), KeyModifiers::NONE) => self.controller.clear_selection(),
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                if let Some(row) = rows.get(self.cursor) {
                    self.controller.request_single_delete(&row.id, rows);
                    self.open_dialog();
                }
            }
            (KeyCode::Char('D'), _) => {
                // Bulk delete lives on the action bar, which only exists with a selection.
                if self.controller.selected_count() == 0 {
                    return Some(MultiSelectAction::NothingSelected);
                }
                self.controller.request_bulk_delete();
                self.open_dialog();
            }
            _ => {}
        }
        None
    }

    fn open_dialog(&mut self) {
        if let Some(pending) = self.controller.pending() {
            self.dialog.open(pending);
        }
    }

    fn handle_dialog_input(&mut self, key: KeyEvent) -> Option<MultiSelectAction> {
        if self.controller.is_deleting() {
            return None;
        }

        match self.dialog.handle_input(key)? {
            ConfirmAction::InputChanged(value) => {
                self.controller.set_input(value);
                None
            }
            ConfirmAction::Confirm => {
                let request = self.controller.confirm()?;
                self.dialog.start_deleting();
                Some(MultiSelectAction::StartDelete(request))
            }
            ConfirmAction::Cancel => {
                self.controller.cancel();
                self.dialog.close();
                None
            }
        }
    }

    /// Apply a finished deletion to `rows`.
    ///
    /// Returns `DataChanged` with the new collection, or `None` if `request`
    /// is not the deletion in flight.
    pub fn complete_delete(
        &mut self,
        request: &DeleteRequest,
        rows: &[Row],
    ) -> Option<MultiSelectAction> {
        let remaining = self.controller.complete(request, rows)?;
        self.dialog.close();
        self.cursor = self.cursor.min(remaining.len().saturating_sub(1));
        debug!(remaining = remaining.len(), "Multi-select data changed");
        Some(MultiSelectAction::DataChanged(remaining))
    }

    /// Render the view and, when open, the confirmation dialog over it.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, rows: &[Row]) {
        let t = theme();
        let selected_count = self.controller.selected_count();
        let bar_height = if selected_count > 0 { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(bar_height), // Bulk action bar
                Constraint::Min(3),             // Table
                Constraint::Length(1),          // Footer
            ])
            .split(area);

        if selected_count > 0 {
            let bar = Line::from(vec![
                Span::styled(
                    format!(" {} item(s) selected ", selected_count),
                    Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  [c] clear  ", Style::default().fg(t.dim)),
                Span::styled("[D] delete selected", Style::default().fg(t.danger)),
            ]);
            frame.render_widget(Paragraph::new(bar), chunks[0]);
        }

        let block = Block::default()
            .title(" Multi-Select ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        if rows.is_empty() {
            let empty = Paragraph::new("No items available")
                .style(Style::default().fg(t.dim))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[1]);
        } else {
            self.cursor = self.cursor.min(rows.len() - 1);
            let table = self.build_table(rows).block(block);
            let mut state = TableState::default();
            state.select(Some(self.cursor));
            frame.render_stateful_widget(table, chunks[1], &mut state);
        }

        let footer = format!(
            "Total: {} items  Selected: {}",
            rows.len(),
            selected_count
        );
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(t.dim)),
            chunks[2],
        );

        if let Some(pending) = self.controller.pending() {
            let ctx = DialogContext {
                pending,
                selected_count,
                valid: self.controller.is_confirmation_valid(),
                deleting: self.controller.is_deleting(),
            };
            self.dialog.render(frame, area, ctx);
        }
    }

    fn build_table<'a>(&self, rows: &'a [Row]) -> Table<'a> {
        let t = theme();

        let header = TableRow::new(vec![
            Cell::from(checkbox(self.controller.is_all_selected(rows))),
            Cell::from("ID"),
            Cell::from("Name"),
            Cell::from("Category"),
        ])
        .style(t.header_style());

        let body: Vec<TableRow> = rows
            .iter()
            .map(|row| {
                let checked = self.controller.is_selected(&row.id);
                let style = if checked {
                    Style::default().fg(t.success)
                } else {
                    Style::default()
                };
                TableRow::new(vec![
                    Cell::from(checkbox(checked)),
                    Cell::from(row.id.as_str()),
                    Cell::from(row.name.as_str()),
                    Cell::from(row.category.as_str()),
                ])
                .style(style)
            })
            .collect();

        Table::new(
            body,
            [
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Percentage(55),
                Constraint::Percentage(45),
            ],
        )
        .header(header)
        .highlight_style(t.highlight_style())
        .highlight_symbol("> ")
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}
