use super::Component;
use crate::config::PickerConfig;
use crate::event::AppMsg;
use crate::widgets::common::panel;
use crate::widgets::pixel_grid::{PixelGrid, cell_to_pixel, fit_image};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::path::{Path, PathBuf};

/// Idle until the first click, then Marked with every pick in click order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PickState {
    #[default]
    Idle,
    Marked(Vec<(u32, u32)>),
}

impl PickState {
    pub fn record(&mut self, point: (u32, u32)) {
        match self {
            PickState::Idle => *self = PickState::Marked(vec![point]),
            PickState::Marked(points) => points.push(point),
        }
    }

    pub fn picks(&self) -> &[(u32, u32)] {
        match self {
            PickState::Idle => &[],
            PickState::Marked(points) => points,
        }
    }
}

pub struct HotspotEditorState {
    pub source_path: PathBuf,
    pub state: PickState,
    /// Pixel under the mouse, if any.
    pub hover: Option<(u32, u32)>,
    canvas: RgbaImage,
    marker_radius: u32,
    marker_color: Rgba<u8>,
    title: String,
    // Where the image was last drawn, for hit testing.
    view: Rect,
}

impl HotspotEditorState {
    pub fn new(source_path: PathBuf, image: RgbaImage, picker: &PickerConfig) -> Self {
        let [r, g, b] = picker.marker_color;
        let title = format!(
            "{} ({}x{})",
            source_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source_path.display().to_string()),
            image.width(),
            image.height()
        );

        Self {
            source_path,
            state: PickState::Idle,
            hover: None,
            canvas: image,
            marker_radius: picker.marker_radius,
            marker_color: Rgba([r, g, b, 255]),
            title,
            view: Rect::default(),
        }
    }

    pub fn open(path: &Path, picker: &PickerConfig) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .to_rgba8();
        Ok(Self::new(path.to_path_buf(), image, picker))
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Terminal cells covered by the image in the last frame.
    pub fn view(&self) -> Rect {
        self.view
    }

    pub fn pixel_at(&self, column: u16, row: u16) -> Option<(u32, u32)> {
        let (width, height) = self.canvas.dimensions();
        cell_to_pixel(self.view, width, height, column, row)
    }

    pub fn mark(&mut self, x: u32, y: u32) {
        draw_filled_circle_mut(
            &mut self.canvas,
            (x as i32, y as i32),
            self.marker_radius as i32,
            self.marker_color,
        );
        self.state.record((x, y));
    }
}

impl Component for HotspotEditorState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::Click { column, row } => {
                let (x, y) = self.pixel_at(*column, *row)?;
                self.mark(x, y);
                Some(AppMsg::HotspotPicked(x, y))
            }
            AppMsg::Hover { column, row } => {
                self.hover = self.pixel_at(*column, *row);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let block = panel(&self.title, Some(" left click: mark | any key: quit "), is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let (width, height) = self.canvas.dimensions();
        self.view = fit_image(inner, width, height);
        PixelGrid::new(&self.canvas).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> HotspotEditorState {
        let image = RgbaImage::from_pixel(25, 25, Rgba([255, 255, 255, 255]));
        let mut editor = HotspotEditorState::new(PathBuf::from("cry.png"), image, &PickerConfig::default());

        // 50x25 inside the border at zoom 1
        let area = Rect::new(0, 0, 52, 27);
        let mut buf = Buffer::empty(area);
        editor.render(area, &mut buf, true);
        editor
    }

    #[test]
    fn test_pick_state_transitions() {
        let mut state = PickState::default();
        assert!(state.picks().is_empty());

        state.record((1, 2));
        assert_eq!(state, PickState::Marked(vec![(1, 2)]));

        state.record((3, 4));
        assert_eq!(state.picks(), &[(1, 2), (3, 4)]);
    }

    #[test]
    fn test_click_marks_pixel() {
        let mut editor = editor();

        // border at column 0, so pixel (10, 10) starts at column 1 + 20
        let reply = editor.update(&AppMsg::Click { column: 21, row: 11 });
        assert!(matches!(reply, Some(AppMsg::HotspotPicked(10, 10))));
        assert_eq!(editor.state, PickState::Marked(vec![(10, 10)]));
        assert_eq!(editor.canvas().get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(editor.canvas().get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_click_on_border_is_ignored() {
        let mut editor = editor();
        assert!(editor.update(&AppMsg::Click { column: 0, row: 0 }).is_none());
        assert!(editor.update(&AppMsg::Click { column: 51, row: 5 }).is_none());
        assert_eq!(editor.state, PickState::Idle);
    }

    #[test]
    fn test_hover_tracks_pixel() {
        let mut editor = editor();
        editor.update(&AppMsg::Hover { column: 2, row: 1 });
        assert_eq!(editor.hover, Some((0, 0)));

        editor.update(&AppMsg::Hover { column: 0, row: 0 });
        assert_eq!(editor.hover, None);
    }

    #[test]
    fn test_open_missing_image_fails() {
        let result = HotspotEditorState::open(Path::new("/nonexistent/cursor.png"), &PickerConfig::default());
        assert!(result.is_err());
    }
}
