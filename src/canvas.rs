use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::scene::{DrawCommand, Point, Scene};

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// RGBA8 frame buffer view, row-major, as handed out by `pixels`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `frame`. Rows beyond what `frame` can hold are treated as
    /// outside the canvas.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(frame.len() / (width * 4))
        };
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    pub fn clear(&mut self, color: Color) {
        let len = self.width * self.height * 4;
        for chunk in self.frame[..len].chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Blends `color` over the pixel at (x, y) with coverage `alpha`.
    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = (y as usize * self.width + x as usize) * 4;
        let (r, g, b) = color.as_tuple();
        let src = [r as f32, g as f32, b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Fills the pixels whose centres fall inside the rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let (x0, x1) = self.span(x, x + width, self.width);
        let (y0, y1) = self.span(y, y + height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, 1.0);
            }
        }
    }

    fn span(&self, start: f64, end: f64, limit: usize) -> (i32, i32) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().min(limit as f64);
        (lo as i32, hi.max(lo) as i32)
    }

    /// Filled disc with a one pixel anti-aliased rim.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let min_x = (center.x - radius - 1.0).floor() as i32;
        let max_x = (center.x + radius + 1.0).ceil() as i32;
        let min_y = (center.y - radius - 1.0).floor() as i32;
        let max_y = (center.y + radius + 1.0).ceil() as i32;
        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if aa > 0.0 {
                    self.blend(x, y, color, aa as f32);
                }
            }
        }
    }

    /// Thick anti-aliased segment with round caps.
    pub fn line(&mut self, from: Point, to: Point, thickness: f32, color: Color) {
        let half = thickness as f64 / 2.0;
        let pad = half.ceil() + 1.0;
        let min_x = (from.x.min(to.x) - pad).floor() as i32;
        let max_x = (from.x.max(to.x) + pad).ceil() as i32;
        let min_y = (from.y.min(to.y) - pad).floor() as i32;
        let max_y = (from.y.max(to.y) + pad).ceil() as i32;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;
        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let px = x as f64 + 0.5 - from.x;
                let py = y as f64 + 0.5 - from.y;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = t * dx - px;
                let ly = t * dy - py;
                let dist = (lx * lx + ly * ly).sqrt();
                let aa = (half + 0.5 - dist).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend(x, y, color, aa as f32);
                }
            }
        }
    }

    /// Draws `text` with its baseline starting at `origin`.
    pub fn text(&mut self, font: &Font, origin: Point, text: &str, size: f32, color: Color) {
        if size <= 0.0 {
            return;
        }
        let scale = Scale::uniform(size);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(text, scale, point(origin.x as f32, origin.y as f32))
            .collect();
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    if coverage > 0.001 {
                        let x = bb.min.x + gx as i32;
                        let y = bb.min.y + gy as i32;
                        self.blend(x, y, color, coverage);
                    }
                });
            }
        }
    }
}

// ============================================================================
// SCENE PLAYBACK
// ============================================================================

impl Scene {
    /// Replays every command onto `canvas`. Text is skipped without a font.
    pub fn paint(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in self.commands() {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => canvas.fill_rect(*x, *y, *width, *height, *color),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
                DrawCommand::Text {
                    origin,
                    text,
                    font_size,
                    color,
                } => {
                    if let Some(font) = font {
                        canvas.text(font, *origin, text, *font_size, *color);
                    }
                }
                DrawCommand::Needle {
                    from,
                    to,
                    width,
                    color,
                    ..
                } => canvas.line(*from, *to, *width, *color),
            }
        }
    }
}
