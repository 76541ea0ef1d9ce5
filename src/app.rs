use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io;
use std::path::Path;

use crate::components::Component;
use crate::components::hotspot_editor::{HotspotEditorState, PickState};
use crate::components::logs::LogsState;
use crate::config::PickerConfig;
use crate::event::AppMsg;
use crate::widgets::theme::get_theme;

/// Shows `image_path` and returns every pixel the user clicked, in order.
/// The image is loaded before the terminal is touched.
pub fn pick_hotspots(image_path: &Path, picker: &PickerConfig) -> Result<Vec<(u32, u32)>> {
    let editor = HotspotEditorState::open(image_path, picker)?;
    let mut app = App::new(editor);
    app.run()?;
    Ok(app.picks().to_vec())
}

pub struct App {
    editor: HotspotEditorState,
    logs: LogsState,
}

impl App {
    pub fn new(editor: HotspotEditorState) -> Self {
        let loaded = AppMsg::LogMessage(format!(
            "Loaded {}. Click the image to pick a hotspot.",
            editor.source_path.display()
        ));
        let mut app = Self {
            editor,
            logs: LogsState::default(),
        };
        app.dispatch(loaded);
        app
    }

    pub fn picks(&self) -> &[(u32, u32)] {
        self.editor.state.picks()
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        let mut res = self.event_loop(&mut terminal);

        // Restore terminal
        if let Err(e) = restore_terminal(&mut terminal) {
            if res.is_ok() {
                res = Err(e);
            }
        }
        res
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            // Blocks until the next terminal event; clicks are handled in order
            if let Some(msg) = translate(event::read()?) {
                if !self.dispatch(msg) {
                    return Ok(());
                }
            }
        }
    }

    /// Routes a message through the components. Returns false once the
    /// session is over.
    pub fn dispatch(&mut self, msg: AppMsg) -> bool {
        if matches!(msg, AppMsg::Key(_)) {
            return false;
        }

        let mut pending = Some(msg);
        while let Some(msg) = pending.take() {
            pending = self.editor.update(&msg);
            self.logs.update(&msg);
        }
        true
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(7),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.editor.render(chunks[0], f.buffer_mut(), true);
        self.logs.render(chunks[1], f.buffer_mut(), false);
        f.render_widget(self.status_line(), chunks[2]);
    }

    fn status_line(&self) -> Paragraph<'static> {
        let theme = get_theme();
        let hover = match self.editor.hover {
            Some((x, y)) => format!("({}, {})", x, y),
            None => "-".to_string(),
        };
        let state = match &self.editor.state {
            PickState::Idle => "no hotspot picked yet".to_string(),
            PickState::Marked(points) => match points.last() {
                Some((x, y)) => format!("{} picked, last ({}, {})", points.len(), x, y),
                None => "no hotspot picked yet".to_string(),
            },
        };

        Paragraph::new(Line::from(vec![
            Span::styled("Pointer: ", Style::default().fg(theme.text_highlight)),
            Span::raw(hover),
            Span::raw("  |  "),
            Span::styled(state, Style::default().fg(theme.text_secondary)),
        ]))
    }
}

/// Left button presses become clicks, motion becomes hover, any key press quits.
pub fn translate(event: Event) -> Option<AppMsg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppMsg::Key(key)),
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            ..
        }) => match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(AppMsg::Click { column, row }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(AppMsg::Hover { column, row }),
            _ => None,
        },
        _ => None,
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().ok();
    // Must go to the same stdout the backend uses
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use image::{Rgba, RgbaImage};
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn app() -> App {
        let image = RgbaImage::from_pixel(25, 25, Rgba([0, 0, 0, 0]));
        App::new(HotspotEditorState::new(
            PathBuf::from("cursor-cry-x25.png"),
            image,
            &PickerConfig::default(),
        ))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_translate_events() {
        assert!(matches!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)),
            Some(AppMsg::Click { column: 4, row: 2 })
        ));
        assert!(matches!(
            translate(mouse(MouseEventKind::Moved, 1, 1)),
            Some(AppMsg::Hover { column: 1, row: 1 })
        ));
        assert!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 4, 2)).is_none());
        assert!(translate(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2)).is_none());
        assert!(matches!(
            translate(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))),
            Some(AppMsg::Key(_))
        ));
        assert!(translate(Event::Resize(80, 24)).is_none());
    }

    #[test]
    fn test_clicks_are_recorded_and_logged() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 45)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let view = app.editor.view();
        assert!(app.dispatch(AppMsg::Click { column: view.x + 10, row: view.y + 7 }));
        assert!(app.dispatch(AppMsg::Click { column: view.x, row: view.y }));

        let (cols_per_px, rows_per_px) = (view.width / 25, view.height / 25);
        assert_eq!(
            app.picks(),
            &[(10 / cols_per_px as u32, 7 / rows_per_px as u32), (0, 0)]
        );
        assert!(app.logs.logs.iter().any(|l| l.starts_with("Hotspot: (")));
    }

    #[test]
    fn test_any_key_ends_session() {
        let mut app = app();
        assert!(!app.dispatch(AppMsg::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))));
        assert!(app.picks().is_empty());
    }

    #[test]
    fn test_session_opens_with_loaded_message() {
        let app = app();
        assert_eq!(app.logs.logs.len(), 1);
        assert!(app.logs.logs[0].starts_with("Loaded cursor-cry-x25.png"));
        assert!(app.picks().is_empty());
    }

    #[test]
    fn test_pick_hotspots_missing_image_fails_before_terminal() {
        let err = pick_hotspots(Path::new("/nonexistent/cursor.png"), &PickerConfig::default());
        assert!(err.is_err());
    }
}
