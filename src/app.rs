//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events go in
//! through [`App::update`] and [`App::handle_task_message`], and
//! [`App::view`] renders the current state.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::data::Row;
use crate::events::{Event, KeyContext};
use crate::tasks::{TaskMessage, TaskSpawner};
use crate::ui::theme::theme;
use crate::ui::{
    render_context_help, HelpAction, HelpView, MultiSelectAction, MultiSelectView,
    NotificationManager, PaginationView,
};

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Paginated table with search and sort.
    #[default]
    Pagination,
    /// Multi-select table with deletes.
    MultiSelect,
    /// Application is in the process of exiting.
    Exiting,
}

impl AppState {
    fn tab_index(&self) -> usize {
        match self {
            AppState::MultiSelect => 1,
            _ => 0,
        }
    }
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current screen.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// Whether the help overlay is open.
    show_help: bool,
    /// The full dataset, browsed by the pagination table.
    dataset: Vec<Row>,
    /// Rows of the multi-select table. Replaced wholesale after each deletion.
    rows: Vec<Row>,
    pagination: PaginationView,
    multi_select: MultiSelectView,
    help: HelpView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Runs the simulated deletes.
    tasks: TaskSpawner,
    /// Simulated network latency for deletes.
    delete_delay: Duration,
}

impl App {
    /// Create the application.
    ///
    /// The multi-select table is seeded with the first
    /// `settings.multi_select_rows` rows of `dataset`.
    pub fn new(settings: &Settings, dataset: Vec<Row>, tasks: TaskSpawner) -> Self {
        let rows: Vec<Row> = dataset
            .iter()
            .take(settings.multi_select_rows)
            .cloned()
            .collect();
        debug!(
            dataset = dataset.len(),
            multi_select = rows.len(),
            "Creating application"
        );

        Self {
            state: AppState::default(),
            should_quit: false,
            show_help: false,
            dataset,
            rows,
            pagination: PaginationView::new(settings.page_size, &settings.page_size_options),
            multi_select: MultiSelectView::new(),
            help: HelpView::new(),
            notifications: NotificationManager::new(),
            tasks,
            delete_delay: Duration::from_millis(settings.delete_delay_ms),
        }
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current screen.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Whether the help overlay is open.
    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Rows of the multi-select table.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    /// Apply a message from a background task.
    pub fn handle_task_message(&mut self, message: TaskMessage) {
        match message {
            TaskMessage::DeleteCompleted(request) => {
                if let Some(action) = self.multi_select.complete_delete(&request, &self.rows) {
                    self.handle_multi_select_action(action);
                }
            }
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        if self.show_help {
            if let Some(HelpAction::Close) = self.help.handle_input(key_event) {
                self.show_help = false;
            }
            return;
        }

        // Modal input goes straight to the focused view
        if self.state == AppState::MultiSelect && self.multi_select.is_dialog_open() {
            self.route_to_view(key_event);
            return;
        }
        if self.state == AppState::Pagination && self.pagination.is_editing() {
            self.route_to_view(key_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.state = match self.state {
                    AppState::Pagination => AppState::MultiSelect,
                    _ => AppState::Pagination,
                };
                debug!(state = ?self.state, "Switched table");
            }
            KeyCode::Char('1') => self.state = AppState::Pagination,
            KeyCode::Char('2') => self.state = AppState::MultiSelect,
            _ => self.route_to_view(key_event),
        }
    }

    fn route_to_view(&mut self, key_event: KeyEvent) {
        match self.state {
            AppState::Pagination => self.pagination.handle_input(key_event, &self.dataset),
            AppState::MultiSelect => {
                if let Some(action) = self.multi_select.handle_input(key_event, &self.rows) {
                    self.handle_multi_select_action(action);
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_multi_select_action(&mut self, action: MultiSelectAction) {
        match action {
            MultiSelectAction::StartDelete(request) => {
                self.tasks.spawn_delete(request, self.delete_delay);
            }
            MultiSelectAction::NothingSelected => {
                self.notifications.warning("Select items before deleting");
            }
            MultiSelectAction::DataChanged(rows) => {
                let removed = self.rows.len().saturating_sub(rows.len());
                info!(removed, remaining = rows.len(), "Rows replaced");
                self.rows = rows;
                self.notifications.success(format!("Deleted {} item(s)", removed));
            }
        }
    }

    fn handle_tick(&mut self) {
        self.multi_select.tick();
        self.notifications.tick();
    }

    fn key_context(&self) -> KeyContext {
        if self.show_help {
            return KeyContext::Global;
        }
        match self.state {
            AppState::MultiSelect if self.multi_select.is_dialog_open() => {
                KeyContext::ConfirmDialog
            }
            AppState::MultiSelect => KeyContext::MultiSelect,
            AppState::Pagination => KeyContext::Pagination,
            AppState::Exiting => KeyContext::Global,
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title, tabs and divider
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);

        match self.state {
            AppState::Pagination | AppState::Exiting => {
                self.pagination.render(frame, chunks[1], &self.dataset)
            }
            AppState::MultiSelect => self.multi_select.render(frame, chunks[1], &self.rows),
        }

        render_context_help(frame, chunks[2], self.key_context());

        self.notifications.render(frame, area);

        if self.show_help {
            self.help.render(frame, area);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let titles = vec![
            Line::from(Span::raw(" 1 Pagination ")),
            Line::from(Span::raw(" 2 Multi-Select ")),
        ];
        let tabs = Tabs::new(titles)
            .select(self.state.tab_index())
            .style(Style::default().fg(t.dim))
            .highlight_style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .title(" lazytable ")
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(t.dim)),
            );
        frame.render_widget(tabs, area);
    }
}
