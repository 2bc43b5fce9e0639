//! Paginated table view with search and sorting.
//!
//! All query state lives in a [`TableQuery`]; this view adds the cursor,
//! the search box, and rendering. The rows themselves are owned by the app
//! and passed in on every call.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use tracing::trace;

use crate::data::Row;
use crate::table::{SortKey, TableQuery};
use crate::ui::components::{InputMode, TextInput};
use crate::ui::theme::theme;

/// The paginated table view.
#[derive(Debug)]
pub struct PaginationView {
    query: TableQuery,
    search: TextInput,
    mode: InputMode,
    /// Cursor within the current page.
    selected: usize,
}

impl PaginationView {
    /// Create a view with the given page size and selectable sizes.
    pub fn new(page_size: usize, page_size_options: &[usize]) -> Self {
        let mut search = TextInput::new();
        search.set_placeholder("Press / to search by id, name or category");
        Self {
            query: TableQuery::new(page_size, page_size_options),
            search,
            mode: InputMode::Normal,
            selected: 0,
        }
    }

    /// The underlying query.
    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    /// Whether the search box has focus.
    pub fn is_editing(&self) -> bool {
        self.mode == InputMode::Insert
    }

    /// Cursor position within the current page.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, rows: &[Row]) {
        trace!(code = ?key.code, mode = ?self.mode, "Pagination key");
        match self.mode {
            InputMode::Insert => self.handle_search_input(key),
            InputMode::Normal => self.handle_normal_input(key, rows),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = InputMode::Normal,
            _ => {
                if self.search.handle_input(key) {
                    self.query.set_search(self.search.value());
                    self.selected = 0;
                }
            }
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent, rows: &[Row]) {
        let page_len = self.query.clone().page_of(rows).rows.len();

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.selected + 1 < page_len {
                    self.selected += 1;
                }
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                self.query.next_page(rows);
                self.selected = 0;
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.query.prev_page();
                self.selected = 0;
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.query.first_page();
                self.selected = 0;
            }
            (KeyCode::Char('G'), _) => {
                self.query.last_page(rows);
                self.selected = 0;
            }
            (KeyCode::Char('/'), _) => self.mode = InputMode::Insert,
            (KeyCode::Char('s'), KeyModifiers::NONE) => {
                self.query.sort_by(self.query.sort_key().next());
                self.selected = 0;
            }
            (KeyCode::Char('o'), KeyModifiers::NONE) => {
                self.query.sort_by(self.query.sort_key());
                self.selected = 0;
            }
            (KeyCode::Char('n'), KeyModifiers::NONE) => {
                self.query.cycle_page_size();
                self.selected = 0;
            }
            _ => {}
        }
    }

    /// Render the view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, rows: &[Row]) {
        let t = theme();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let editing = self.is_editing();
        self.search.render(frame, chunks[0], Some("Search"), editing);

        let sort_key = self.query.sort_key();
        let arrow = self.query.sort_order().arrow();
        let page_size = self.query.page_size();
        let page = self.query.page_of(rows);
        if !page.rows.is_empty() {
            self.selected = self.selected.min(page.rows.len() - 1);
        }

        let block = Block::default()
            .title(format!(
                " Companies (sorted by {} {}, {} per page) ",
                sort_key.label(),
                arrow,
                page_size
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        if page.rows.is_empty() {
            let empty = Paragraph::new("No results found")
                .style(Style::default().fg(t.dim))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[1]);
        } else {
            let header = TableRow::new(
                [SortKey::Id, SortKey::Name, SortKey::Category]
                    .into_iter()
                    .map(|key| {
                        if key == sort_key {
                            Cell::from(format!("{} {}", key.label(), arrow))
                        } else {
                            Cell::from(key.label())
                        }
                    }),
            )
            .style(t.header_style());

            let body: Vec<TableRow> = page
                .rows
                .iter()
                .map(|row| {
                    TableRow::new(vec![
                        Cell::from(row.id.clone()),
                        Cell::from(row.name.clone()),
                        Cell::from(row.category.clone()),
                    ])
                })
                .collect();

            let table = Table::new(
                body,
                [
                    Constraint::Length(8),
                    Constraint::Percentage(55),
                    Constraint::Percentage(45),
                ],
            )
            .header(header)
            .block(block)
            .highlight_style(t.highlight_style())
            .highlight_symbol("> ");

            let mut state = TableState::default();
            state.select(Some(self.selected));
            frame.render_stateful_widget(table, chunks[1], &mut state);
        }

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        frame.render_widget(
            Paragraph::new(page.range_label()).style(Style::default().fg(t.dim)),
            footer[0],
        );
        let page_info = Line::from(vec![
            Span::raw("Page "),
            Span::styled(
                page.number.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" of {}", page.total_pages)),
        ]);
        frame.render_widget(
            Paragraph::new(page_info).alignment(Alignment::Right),
            footer[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_rows;
    use crate::table::SortOrder;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn view() -> PaginationView {
        PaginationView::new(10, &[5, 10, 20, 50])
    }

    #[test]
    fn test_cursor_stays_within_page() {
        let rows = sample_rows();
        let mut view = view();
        for _ in 0..20 {
            view.handle_input(key('j'), &rows);
        }
        assert_eq!(view.selected(), 9);
        view.handle_input(key('k'), &rows);
        assert_eq!(view.selected(), 8);
    }

    #[test]
    fn test_page_keys_reset_cursor() {
        let rows = sample_rows();
        let mut view = view();
        view.handle_input(key('j'), &rows);
        view.handle_input(key('l'), &rows);
        assert_eq!(view.query().page(), 2);
        assert_eq!(view.selected(), 0);

        view.handle_input(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), &rows);
        assert_eq!(view.query().page(), 5);

        view.handle_input(key('h'), &rows);
        assert_eq!(view.query().page(), 4);

        view.handle_input(key('g'), &rows);
        assert_eq!(view.query().page(), 1);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let rows = sample_rows();
        let mut view = view();
        view.handle_input(key('/'), &rows);
        assert!(view.is_editing());

        for c in "acme".chars() {
            view.handle_input(key(c), &rows);
        }
        assert_eq!(view.query().search(), "acme");
        assert_eq!(view.query().clone().page_of(&rows).total_matches, 1);

        view.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &rows);
        assert!(!view.is_editing());
    }

    #[test]
    fn test_sort_keys() {
        let rows = sample_rows();
        let mut view = view();
        view.handle_input(key('s'), &rows);
        assert_eq!(view.query().sort_key(), SortKey::Name);
        assert_eq!(view.query().sort_order(), SortOrder::Ascending);

        view.handle_input(key('o'), &rows);
        assert_eq!(view.query().sort_key(), SortKey::Name);
        assert_eq!(view.query().sort_order(), SortOrder::Descending);
    }

    #[test]
    fn test_page_size_key() {
        let rows = sample_rows();
        let mut view = view();
        view.handle_input(key('n'), &rows);
        assert_eq!(view.query().page_size(), 20);
    }

    #[test]
    fn test_render_shows_range_and_page() {
        let rows = sample_rows();
        let mut view = view();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), &rows))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Showing 1 to 10 of 45 results"));
        assert!(text.contains("Page 1 of 5"));
        assert!(text.contains("Acme Corporation"));
    }

    #[test]
    fn test_render_empty_results() {
        let rows = sample_rows();
        let mut view = view();
        view.handle_input(key('/'), &rows);
        for c in "zzzz".chars() {
            view.handle_input(key(c), &rows);
        }
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), &rows))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No results found"));
        assert!(text.contains("Showing 0 to 0 of 0 results"));
    }
}
