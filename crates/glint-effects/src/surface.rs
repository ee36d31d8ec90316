//! Drawing surfaces for the dot effects.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::chars::dot_for_radius;
use crate::color::fade;

/// Alpha below which a dot is not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.02;

/// A solid fill colour with opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub rgb: (u8, u8, u8),
    pub alpha: f32,
}

impl Fill {
    pub const fn white(alpha: f32) -> Self {
        Self {
            rgb: (255, 255, 255),
            alpha,
        }
    }
}

/// A resizable 2D surface that can be cleared and filled with circles.
pub trait Surface {
    /// Width in surface units.
    fn width(&self) -> f32;

    /// Height in surface units.
    fn height(&self) -> f32;

    /// Match the surface to a new container size. Contents are discarded.
    fn resize(&mut self, width: u16, height: u16);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw a filled circle centred on `(x, y)`.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dot {
    glyph: char,
    fill: Fill,
}

/// Character-cell surface. One surface unit is one terminal cell.
///
/// A circle becomes a single dot glyph sized by its radius. When two circles
/// land in the same cell the more opaque one is kept.
#[derive(Debug, Clone, Default)]
pub struct CellSurface {
    width: u16,
    height: u16,
    cells: Vec<Option<Dot>>,
}

impl CellSurface {
    pub fn new(width: u16, height: u16) -> Self {
        let mut surface = Self::default();
        surface.resize(width, height);
        surface
    }

    /// Glyph drawn at cell `(x, y)`, if any.
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y)
            .and_then(|i| self.cells[i])
            .map(|dot| dot.glyph)
    }

    /// Number of cells holding a dot.
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy drawn dots into `buf` with the surface origin at `area`'s corner.
    ///
    /// Cells without a dot are left untouched so other layers show through.
    pub fn paint(&self, buf: &mut Buffer, area: Rect) {
        for y in 0..self.height.min(area.height) {
            for x in 0..self.width.min(area.width) {
                let Some(dot) = self.index(x, y).and_then(|i| self.cells[i]) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_char(dot.glyph)
                        .set_fg(fade(dot.fill.rgb, dot.fill.alpha));
                }
            }
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

impl Surface for CellSurface {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width as usize * height as usize];
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill) {
        if fill.alpha < MIN_VISIBLE_ALPHA || x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x.floor(), y.floor());
        if col >= self.width as f32 || row >= self.height as f32 {
            return;
        }
        let Some(i) = self.index(col as u16, row as u16) else {
            return;
        };
        let dot = Dot {
            glyph: dot_for_radius(radius),
            fill,
        };
        match self.cells[i] {
            Some(existing) if existing.fill.alpha >= fill.alpha => {}
            _ => self.cells[i] = Some(dot),
        }
    }
}

/// Surface that records every call, for checking what an effect draws.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<Call>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Call {
    Clear,
    Circle { x: f32, y: f32, radius: f32, fill: Fill },
}

#[cfg(test)]
impl Surface for Recorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width as f32;
        self.height = height as f32;
        self.calls.clear();
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill) {
        self.calls.push(Call::Circle { x, y, radius, fill });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_fill_and_clear() {
        let mut surface = CellSurface::new(10, 5);
        surface.fill_circle(3.7, 2.2, 0.5, Fill::white(0.6));
        assert_eq!(surface.glyph_at(3, 2), Some('·'));
        assert_eq!(surface.painted_cells(), 1);

        surface.clear();
        assert_eq!(surface.painted_cells(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut surface = CellSurface::new(4, 4);
        surface.fill_circle(-0.5, 1.0, 1.0, Fill::white(1.0));
        surface.fill_circle(4.0, 1.0, 1.0, Fill::white(1.0));
        surface.fill_circle(1.0, 9.0, 1.0, Fill::white(1.0));
        assert_eq!(surface.painted_cells(), 0);
    }

    #[test]
    fn test_zero_size_surface_accepts_draws() {
        let mut surface = CellSurface::new(0, 0);
        surface.fill_circle(0.0, 0.0, 1.0, Fill::white(1.0));
        assert_eq!(surface.painted_cells(), 0);
    }

    #[test]
    fn test_more_opaque_dot_wins() {
        let mut surface = CellSurface::new(2, 2);
        surface.fill_circle(0.1, 0.1, 2.0, Fill::white(0.9));
        surface.fill_circle(0.2, 0.2, 0.4, Fill::white(0.3));
        assert_eq!(surface.glyph_at(0, 0), Some('●'));
    }

    #[test]
    fn test_invisible_dots_are_skipped() {
        let mut surface = CellSurface::new(2, 2);
        surface.fill_circle(1.0, 1.0, 1.0, Fill::white(0.0));
        assert_eq!(surface.painted_cells(), 0);
    }

    #[test]
    fn test_paint_offsets_into_area() {
        let mut surface = CellSurface::new(3, 3);
        surface.fill_circle(1.0, 2.0, 1.0, Fill::white(1.0));

        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        surface.paint(&mut buf, Rect::new(5, 4, 3, 3));

        let cell = buf.cell((6, 6)).unwrap();
        assert_eq!(cell.symbol(), "•");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf.cell((1, 2)).unwrap().symbol(), " ");
    }
}
