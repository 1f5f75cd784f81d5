// filepath: src/draw.rs
//! Drawing utilities for scribbler
//!
//! This file contains the software rasterizer used by the overlay:
//! a canvas over an ARGB8888 byte buffer, clearing, and thick
//! straight-line strokes with round ends.

use crate::error::ConfigError;
use crate::input::Point;

/// Straight (non-premultiplied) RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color ("blue", "#00f", "rgb(0 0 255 / 50%)", ...)
    pub fn from_css(value: &str) -> Result<Self, ConfigError> {
        let color = csscolorparser::parse(value).map_err(|source| ConfigError::InvalidColor {
            value: value.to_string(),
            source,
        })?;
        let [r, g, b, a] = color.to_rgba8();
        Ok(Self { r, g, b, a })
    }

    /// Pixel bytes as laid out in a little-endian ARGB8888 buffer,
    /// with alpha premultiplied as the compositor expects.
    pub fn to_argb8888(self) -> [u8; 4] {
        let premultiply = |c: u8| ((c as u16 * self.a as u16 + 127) / 255) as u8;
        [
            premultiply(self.b),
            premultiply(self.g),
            premultiply(self.r),
            self.a,
        ]
    }
}

/// Canvas abstraction over a raw ARGB8888 pixel buffer
pub struct Canvas<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Create a new canvas from a raw buffer
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert!(buffer.len() >= (width * height * 4) as usize);
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Get the width of the canvas
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the canvas
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to fully transparent
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Raw pixel bytes at (x, y), if inside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize * 4;
        let mut px = [0; 4];
        px.copy_from_slice(self.buffer.get(idx..idx + 4)?);
        Some(px)
    }

    /// Composite a color over the pixel at (x, y)
    fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let idx = (y * self.width + x) as usize * 4;
        let Some(dst) = self.buffer.get_mut(idx..idx + 4) else {
            return;
        };
        let src_alpha = src[3] as u16;
        if src_alpha == 255 {
            dst.copy_from_slice(&src);
            return;
        }
        // Source-over on premultiplied channels
        for (d, s) in dst.iter_mut().zip(src) {
            *d = (s as u16 + (*d as u16 * (255 - src_alpha) + 127) / 255) as u8;
        }
    }

    /// Draw a straight line of the given width with round ends.
    ///
    /// A pixel is painted when its center lies within `width / 2` of the
    /// segment. Lines narrower than one pixel still cover the pixels they
    /// cross. Everything outside the canvas is clipped.
    pub fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        if self.width == 0 || self.height == 0 || color.a == 0 {
            return;
        }
        let half = (width as f64 / 2.0).max(0.5);
        let src = color.to_argb8888();

        let min_x = (from.x.min(to.x) - half).floor().max(0.0);
        let min_y = (from.y.min(to.y) - half).floor().max(0.0);
        let max_x = (from.x.max(to.x) + half).ceil().min(self.width as f64 - 1.0);
        let max_y = (from.y.max(to.y) + half).ceil().min(self.height as f64 - 1.0);
        if max_x < min_x || max_y < min_y {
            return; // Entirely off-canvas
        }

        let half_sq = half * half;
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if distance_sq_to_segment(center, from, to) <= half_sq {
                    self.blend_pixel(x, y, src);
                }
            }
        }
    }
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    cx * cx + cy * cy
}
