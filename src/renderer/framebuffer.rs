//! Half-block pixel framebuffer for terminal output
//!
//! Each terminal cell shows two vertically stacked pixels using `▀` with the
//! foreground as the top pixel and the background as the bottom one. The
//! playfield is scaled uniformly to fit and centred; the rest is letterbox.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as TermColor},
};
use glam::Vec2;

use crate::Color;
use crate::sim::Rect;

/// Colour outside the playfield
pub const LETTERBOX: Color = Color::rgb(24, 24, 32);

const UPPER_HALF: char = '\u{2580}';

#[inline]
fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels (one per terminal column)
    width: usize,
    /// Height in pixels (two per terminal row)
    height: usize,
    pixels: Vec<Color>,
    /// Logical playfield size
    field: Vec2,
    /// Pixels per logical unit
    scale: f32,
    /// Screen position of the playfield origin
    offset: Vec2,
}

impl Framebuffer {
    /// Framebuffer covering `cols` x `rows` terminal cells
    pub fn new(cols: u16, rows: u16, field: Vec2) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            field,
            scale: 1.0,
            offset: Vec2::ZERO,
        };
        fb.resize(cols, rows);
        fb
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols as usize;
        self.height = rows as usize * 2;
        self.pixels = vec![LETTERBOX; self.width * self.height];

        let size = Vec2::new(self.width as f32, self.height as f32);
        self.scale = (size / self.field).min_element().max(0.0);
        self.offset = ((size - self.field * self.scale) / 2.0).floor();
    }

    /// Terminal size this buffer was laid out for
    pub fn cells(&self) -> (u16, u16) {
        (self.width as u16, (self.height / 2) as u16)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Pixel bounds of the playfield, clamped to the buffer
    fn field_pixels(&self) -> (usize, usize, usize, usize) {
        let min = self.to_screen(Vec2::ZERO).round();
        let max = self.to_screen(self.field).round();
        (
            (min.x.max(0.0) as usize).min(self.width),
            (min.y.max(0.0) as usize).min(self.height),
            (max.x.max(0.0) as usize).min(self.width),
            (max.y.max(0.0) as usize).min(self.height),
        )
    }

    /// Letterbox everything, then fill the playfield with `color`
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(LETTERBOX);
        let (x0, y0, x1, y1) = self.field_pixels();
        for y in y0..y1 {
            self.pixels[y * self.width + x0..y * self.width + x1].fill(color);
        }
    }

    /// Fill a logical-space rectangle, clipped to the playfield.
    /// Anything visible covers at least one pixel.
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let (fx0, fy0, fx1, fy1) = self.field_pixels();
        let min = self.to_screen(rect.top_left());
        let max = self.to_screen(Vec2::new(rect.right(), rect.bottom()));

        let span = |lo: f32, hi: f32| {
            let a = lo.round();
            let b = hi.round().max(a + 1.0);
            (a, b)
        };
        let (x0, x1) = span(min.x, max.x);
        let (y0, y1) = span(min.y, max.y);

        let x0 = (x0.max(0.0) as usize).max(fx0);
        let y0 = (y0.max(0.0) as usize).max(fy0);
        let x1 = (x1.max(0.0) as usize).min(fx1);
        let y1 = (y1.max(0.0) as usize).min(fy1);

        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    /// Fill a logical-space circle, clipped to the playfield.
    /// The pixel under the centre is always drawn.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let (fx0, fy0, fx1, fy1) = self.field_pixels();
        let c = self.to_screen(center);
        let r = (radius * self.scale).max(0.75);

        let x0 = ((c.x - r).floor().max(0.0) as usize).max(fx0);
        let y0 = ((c.y - r).floor().max(0.0) as usize).max(fy0);
        let x1 = ((c.x + r).ceil().max(0.0) as usize).min(fx1);
        let y1 = ((c.y + r).ceil().max(0.0) as usize).min(fy1);

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if pixel_center.distance_squared(c) <= r * r {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }

    /// Write the whole buffer as half-block cells
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut prev_fg: Option<Color> = None;
        let mut prev_bg: Option<Color> = None;

        for row in 0..self.height / 2 {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);

                if prev_bg != Some(bottom) {
                    queue!(out, style::SetBackgroundColor(term_color(bottom)))?;
                    prev_bg = Some(bottom);
                }
                if top == bottom {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if prev_fg != Some(top) {
                    queue!(out, style::SetForegroundColor(term_color(top)))?;
                    prev_fg = Some(top);
                }
                queue!(out, style::Print(UPPER_HALF))?;
            }
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    /// 40x30 cells -> 40x60 pixels: a 400x600 field scales by 0.1 exactly
    fn small() -> Framebuffer {
        Framebuffer::new(40, 30, Vec2::new(400.0, 600.0))
    }

    #[test]
    fn test_fit_preserves_aspect() {
        let fb = Framebuffer::new(100, 30, Vec2::new(400.0, 600.0));
        assert_eq!((fb.width(), fb.height()), (100, 60));
        // Height-limited: 60 px / 600 = 0.1, centred horizontally
        assert_eq!(fb.to_screen(Vec2::ZERO), Vec2::new(30.0, 0.0));
        assert_eq!(fb.to_screen(Vec2::new(400.0, 600.0)), Vec2::new(70.0, 60.0));
    }

    #[test]
    fn test_clear_letterboxes() {
        let mut fb = Framebuffer::new(100, 30, Vec2::new(400.0, 600.0));
        fb.clear(BLUE);
        assert_eq!(fb.get(0, 0), LETTERBOX);
        assert_eq!(fb.get(30, 0), BLUE);
        assert_eq!(fb.get(69, 59), BLUE);
        assert_eq!(fb.get(70, 59), LETTERBOX);
    }

    #[test]
    fn test_fill_rect_clipped_to_field() {
        let mut fb = small();
        fb.clear(BLUE);
        // Obstacle straddling the top edge
        fb.fill_rect(&Rect::new(100.0, -7.5, 15.0, 15.0), RED);
        assert_eq!(fb.get(10, 0), RED);
        assert_eq!(fb.get(11, 0), RED);
        assert_eq!(fb.get(12, 0), BLUE);
        assert_eq!(fb.get(10, 1), BLUE);
    }

    #[test]
    fn test_tiny_shapes_still_visible() {
        let mut fb = small();
        fb.clear(BLUE);
        fb.fill_circle(Vec2::new(200.0, 550.0), 5.0, RED);
        assert_eq!(fb.get(20, 55), RED);

        fb.fill_rect(&Rect::new(301.0, 301.0, 2.0, 2.0), RED);
        assert_eq!(fb.get(30, 30), RED);
    }

    #[test]
    fn test_offscreen_shapes_are_skipped() {
        let mut fb = small();
        fb.clear(BLUE);
        fb.fill_rect(&Rect::new(100.0, 650.0, 15.0, 15.0), RED);
        fb.fill_circle(Vec2::new(-50.0, -50.0), 5.0, RED);
        assert!(fb.pixels.iter().all(|c| *c == BLUE));
    }

    #[test]
    fn test_render_uses_half_blocks() {
        let mut fb = small();
        fb.clear(BLUE);
        fb.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), RED);
        let mut out = Vec::new();
        fb.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(UPPER_HALF));
    }
}
