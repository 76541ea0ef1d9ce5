use ratatui::{
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders},
};
use super::theme::get_theme;

/// Bordered panel; the focused one gets a thick green border and a bold title.
/// `hint` is shown in the bottom border.
pub fn panel<'a>(title: &'a str, hint: Option<&'a str>, is_focused: bool) -> Block<'a> {
    let theme = get_theme();

    let (border_type, border_color, title_style) = if is_focused {
        (
            BorderType::Thick,
            theme.border_focused,
            Style::default().fg(theme.text_highlight).add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Plain, theme.border_unfocused, Style::default())
    };

    let block = Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));

    match hint {
        Some(hint) => block.title_bottom(
            Line::styled(hint, Style::default().fg(theme.text_secondary)).right_aligned(),
        ),
        None => block,
    }
}
