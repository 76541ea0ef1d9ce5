// Draws an RGBA image as coloured terminal cells and maps cells back to pixels.
// At zoom 1 one pixel covers two columns and one row, which keeps pixels square
// on a typical terminal font.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use super::theme::get_theme;

const CHECKER_CELL: u32 = 4;

/// Largest rectangle inside `area` that shows a `width`x`height` image.
/// Integer zoom when the image fits, proportional shrink when it does not.
pub fn fit_image(area: Rect, width: u32, height: u32) -> Rect {
    if width == 0 || height == 0 || area.width == 0 || area.height == 0 {
        return Rect::default();
    }

    let want_cols = 2.0 * width as f64;
    let want_rows = height as f64;
    let mut scale = (area.width as f64 / want_cols).min(area.height as f64 / want_rows);
    if scale >= 1.0 {
        scale = scale.floor();
    }

    let cols = ((want_cols * scale).round() as u16).clamp(1, area.width);
    let rows = ((want_rows * scale).round() as u16).clamp(1, area.height);

    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

/// Image pixel under terminal cell `(column, row)`, if the cell is inside `view`.
pub fn cell_to_pixel(view: Rect, width: u32, height: u32, column: u16, row: u16) -> Option<(u32, u32)> {
    if !view.contains(Position { x: column, y: row }) {
        return None;
    }

    let dx = (column - view.x) as u64;
    let dy = (row - view.y) as u64;
    let x = dx * width as u64 / view.width as u64;
    let y = dy * height as u64 / view.height as u64;

    Some((x as u32, y as u32))
}

fn blend(rgba: [u8; 4], background: [u8; 3]) -> Color {
    let a = rgba[3] as u32;
    let mix = |c: u8, bg: u8| ((c as u32 * a + bg as u32 * (255 - a)) / 255) as u8;
    Color::Rgb(
        mix(rgba[0], background[0]),
        mix(rgba[1], background[1]),
        mix(rgba[2], background[2]),
    )
}

pub struct PixelGrid<'a> {
    image: &'a RgbaImage,
}

impl<'a> PixelGrid<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }
}

impl Widget for PixelGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.image.dimensions();
        let view = fit_image(area, width, height);
        let theme = get_theme();

        for row in view.top()..view.bottom() {
            for column in view.left()..view.right() {
                let Some((x, y)) = cell_to_pixel(view, width, height, column, row) else {
                    continue;
                };

                let background = if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
                    theme.checker_light
                } else {
                    theme.checker_dark
                };
                let color = blend(self.image.get_pixel(x, y).0, background);

                if let Some(cell) = buf.cell_mut((column, row)) {
                    cell.set_char(' ').set_bg(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fit_zoom_one_is_two_columns_per_pixel() {
        let area = Rect::new(0, 0, 50, 25);
        assert_eq!(fit_image(area, 25, 25), Rect::new(0, 0, 50, 25));
    }

    #[test]
    fn test_fit_integer_zoom_and_centering() {
        let area = Rect::new(1, 1, 110, 40);
        let view = fit_image(area, 16, 16);
        // min(110 / 32, 40 / 16) = 2.5 -> zoom 2
        assert_eq!((view.width, view.height), (64, 32));
        assert_eq!((view.x, view.y), (1 + 23, 1 + 4));
    }

    #[test]
    fn test_fit_shrinks_large_images() {
        let area = Rect::new(0, 0, 80, 20);
        let view = fit_image(area, 256, 256);
        assert!(view.width <= 80 && view.height <= 20);
        assert_eq!(view.height, 20);
        assert_eq!(view.width, 40);
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_image(Rect::new(0, 0, 0, 10), 5, 5), Rect::default());
        assert_eq!(fit_image(Rect::new(0, 0, 10, 10), 0, 5), Rect::default());
    }

    #[test]
    fn test_cell_to_pixel_at_zoom_one() {
        let view = Rect::new(10, 5, 50, 25);
        assert_eq!(cell_to_pixel(view, 25, 25, 10, 5), Some((0, 0)));
        assert_eq!(cell_to_pixel(view, 25, 25, 11, 5), Some((0, 0)));
        assert_eq!(cell_to_pixel(view, 25, 25, 30, 15), Some((10, 10)));
        assert_eq!(cell_to_pixel(view, 25, 25, 59, 29), Some((24, 24)));
    }

    #[test]
    fn test_cell_to_pixel_outside_view() {
        let view = Rect::new(10, 5, 50, 25);
        assert_eq!(cell_to_pixel(view, 25, 25, 9, 5), None);
        assert_eq!(cell_to_pixel(view, 25, 25, 60, 5), None);
        assert_eq!(cell_to_pixel(view, 25, 25, 10, 30), None);
    }

    #[test]
    fn test_cell_to_pixel_stays_in_bounds_when_shrunk() {
        let view = fit_image(Rect::new(0, 0, 80, 20), 256, 256);
        for row in view.top()..view.bottom() {
            for column in view.left()..view.right() {
                let (x, y) = cell_to_pixel(view, 256, 256, column, row).unwrap();
                assert!(x < 256 && y < 256);
            }
        }
    }

    #[test]
    fn test_render_paints_opaque_pixels() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        PixelGrid::new(&image).render(area, &mut buf);

        assert_eq!(buf.cell((2, 0)).unwrap().bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf.cell((3, 0)).unwrap().bg, Color::Rgb(255, 0, 0));

        let [r, g, b] = get_theme().checker_light;
        assert_eq!(buf.cell((0, 0)).unwrap().bg, Color::Rgb(r, g, b));
    }
}
