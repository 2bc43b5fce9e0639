//! Help overlay listing every keybinding, grouped by context.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::ui::components::centered_rect;
use crate::ui::theme::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help overlay.
    Close,
}

/// The help overlay.
#[derive(Debug)]
pub struct HelpView {
    groups: Vec<(KeyContext, Vec<Keybinding>)>,
    /// Width of the widest key label, for alignment.
    key_width: usize,
    scroll: u16,
}

impl HelpView {
    pub fn new() -> Self {
        let groups = get_keybindings_grouped();
        let key_width = groups
            .iter()
            .flat_map(|(_, bindings)| bindings.iter())
            .map(|b| b.key.chars().count())
            .max()
            .unwrap_or(0);

        Self {
            groups,
            key_width,
            scroll: 0,
        }
    }

    /// Current scroll offset in lines.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Handle keyboard input while the overlay is open.
    ///
    /// All keys are consumed; only `?`, `q` and Esc produce an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                self.scroll = 0;
                Some(HelpAction::Close)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.lines().len().saturating_sub(1) as u16
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::new();

        for (context, bindings) in &self.groups {
            lines.push(Line::from(Span::styled(
                context.display(),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<width$}", binding.key, width = self.key_width),
                        Style::default().fg(t.success),
                    ),
                    Span::raw("  "),
                    Span::raw(binding.description),
                ]));
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            "?, q or Esc to close",
            Style::default().fg(t.dim),
        )));
        lines
    }

    /// Render the overlay centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let width = 64.min(area.width.saturating_sub(4));
        let height = area.height.saturating_sub(4).max(3);
        let help_area = centered_rect(width, height, area);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, help_area);
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}
