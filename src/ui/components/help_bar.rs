//! Contextual help bar component.
//!
//! Displays context-sensitive keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render a single line of shortcut hints for the given context.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, highlighting the bracketed keys.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(
                    std::mem::take(&mut current),
                    Style::default().fg(Color::Cyan),
                ));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(Color::DarkGray)));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hints_to_spans_simple() {
        let spans = parse_hints_to_spans("[Space] select");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "[Space]");
    }

    #[test]
    fn test_parse_hints_to_spans_multiple_keys() {
        // [Enter], " confirm  ", [Esc], " cancel"
        let spans = parse_hints_to_spans("[Enter] confirm  [Esc] cancel");
        assert_eq!(spans.len(), 4);
    }

    #[test]
    fn test_parse_hints_to_spans_empty() {
        assert!(parse_hints_to_spans("").is_empty());
    }

    #[test]
    fn test_parse_hints_to_spans_no_brackets() {
        assert_eq!(parse_hints_to_spans("just text").len(), 1);
    }
}
