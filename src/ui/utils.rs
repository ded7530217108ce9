//! Small rendering helpers shared by the screens.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::input::InputField;

/// Centered sub-rectangle covering the given percentages of `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render a field value with a block cursor when the field is active. `mask`
/// substitutes each character, for password entry.
pub fn input_line(input: &InputField, active: bool, mask: Option<char>) -> Line<'static> {
    let value: String = match mask {
        Some(mask) => input.value().chars().map(|_| mask).collect(),
        None => input.value().to_string(),
    };
    if !active {
        return Line::from(value);
    }

    let cursor = input.cursor_chars();
    let before: String = value.chars().take(cursor).collect();
    let at: String = value.chars().nth(cursor).map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = value.chars().skip(cursor + 1).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}
