use super::Component;
use crate::event::AppMsg;
use crate::widgets::common::panel;
use crate::widgets::theme::get_theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

const MAX_LOGS: usize = 500;

/// Log panel that always follows the newest line.
#[derive(Debug, Default)]
pub struct LogsState {
    pub logs: Vec<String>,
    scroll_state: ScrollbarState,
}

impl LogsState {
    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }
}

impl Component for LogsState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::HotspotPicked(x, y) => {
                self.add_log(format!("Hotspot: ({}, {})", x, y));
            }
            AppMsg::LogMessage(msg) => {
                self.add_log(msg.clone());
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let block = panel("Log", None, is_focused);
        let inner_area = block.inner(area);
        block.render(area, buf);

        let width = (inner_area.width as usize).saturating_sub(2);
        if width == 0 || inner_area.height == 0 {
            return;
        }

        let theme = get_theme();
        let lines: Vec<Line> = self
            .logs
            .iter()
            .flat_map(|log| {
                let style = if log.starts_with("Hotspot") {
                    Style::default().fg(theme.status_ok)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                textwrap::wrap(log, width)
                    .into_iter()
                    .map(move |part| Line::from(Span::styled(part.into_owned(), style)))
                    .collect::<Vec<_>>()
            })
            .collect();

        let total_height = lines.len();
        let offset = total_height.saturating_sub(inner_area.height as usize);
        self.scroll_state = self.scroll_state.content_length(total_height).position(offset);

        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner_area, buf);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));

        StatefulWidget::render(scrollbar, inner_area, buf, &mut self.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_and_messages_are_logged() {
        let mut logs = LogsState::default();
        logs.update(&AppMsg::HotspotPicked(3, 7));
        logs.update(&AppMsg::LogMessage("Loaded cry.png".to_string()));
        logs.update(&AppMsg::Hover { column: 1, row: 1 });
        assert_eq!(logs.logs, vec!["Hotspot: (3, 7)", "Loaded cry.png"]);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut logs = LogsState::default();
        for i in 0..MAX_LOGS + 10 {
            logs.add_log(i.to_string());
        }
        assert_eq!(logs.logs.len(), MAX_LOGS);
        assert_eq!(logs.logs[0], "10");
    }

    #[test]
    fn test_render_shows_latest_line() {
        let mut logs = LogsState::default();
        for i in 0..20 {
            logs.add_log(format!("line {}", i));
        }

        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        logs.render(area, &mut buf, false);

        let row: String = (1..29).map(|x| buf.cell((x, 3)).unwrap().symbol().to_string()).collect();
        assert!(row.contains("line 19"), "last row was {:?}", row);
    }
}
