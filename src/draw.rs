//! Drawing primitives used to build the fixtures.
//!
//! Strokes and fills go through `imageproc` on a thin [`Canvas`] adapter over
//! [`Raster`], so shapes that run off the edge of the buffer are clipped
//! rather than rejected.

use image::Rgb;
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut,
        draw_line_segment_mut, BresenhamLineIter, Canvas,
    },
    rect::Rect as PixelRect,
};
use serde::{Deserialize, Serialize};

use crate::{
    font::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH},
    geometry::Point,
    raster::{Channels, Raster},
};

/// An RGB color. Gray rasters store its luma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub const fn gray(value: u8) -> Self {
        Color([value, value, value])
    }

    /// BT.601 luma, rounded.
    pub fn luma(&self) -> u8 {
        let [r, g, b] = self.0.map(u32::from);
        ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
    }
}

/// Text rendering options for [`put_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Side length, in pixels, of one font cell.
    pub scale: u32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            scale: 2,
            color: Color::BLACK,
        }
    }
}

/// Adapts a [`Raster`] to the `imageproc` drawing routines.
struct RasterCanvas<'a>(&'a mut Raster);

impl Canvas for RasterCanvas<'_> {
    type Pixel = Rgb<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.0.width() as u32, self.0.height() as u32)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        let (x, y) = (x as usize, y as usize);
        match self.0.channels() {
            Channels::Gray => Rgb([self.0.get(x, y, 0).unwrap_or(0); 3]),
            Channels::Rgb => Rgb([0, 1, 2].map(|c| self.0.get(x, y, c).unwrap_or(0))),
        }
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        self.0.put_pixel(x as i32, y as i32, Color(color.0));
    }
}

/// Radius of the round brush that strokes a line `thickness` pixels wide.
fn brush_radius(thickness: u32) -> i32 {
    i32::try_from(thickness / 2).unwrap_or(i32::MAX)
}

/// Liang-Barsky clipping of `from -> to` against the raster grown by `margin`
/// on every side. Returns the rounded endpoints of the visible part.
fn clip_segment(
    from: Point,
    to: Point,
    width: usize,
    height: usize,
    margin: i32,
) -> Option<((f32, f32), (f32, f32))> {
    if width == 0 || height == 0 {
        return None;
    }
    let margin = f64::from(margin);
    let (x_min, y_min) = (-margin, -margin);
    let x_max = width as f64 - 1.0 + margin;
    let y_max = height as f64 - 1.0 + margin;

    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let dx = (i64::from(to.x) - i64::from(from.x)) as f64;
    let dy = (i64::from(to.y) - i64::from(from.y)) as f64;

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, x0 - x_min),
        (dx, x_max - x0),
        (-dy, y0 - y_min),
        (dy, y_max - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| ((x0 + t * dx).round() as f32, (y0 + t * dy).round() as f32);
    Some((at(t0), at(t1)))
}

/// Draws a straight line between two points, both included.
///
/// Lines thicker than one pixel are stroked with a round brush, so they get
/// round caps. The segment is clipped to the buffer before it is walked.
pub fn draw_line(raster: &mut Raster, from: Point, to: Point, color: Color, thickness: u32) {
    let radius = brush_radius(thickness);
    let Some((start, end)) = clip_segment(from, to, raster.width(), raster.height(), radius)
    else {
        return;
    };

    let mut canvas = RasterCanvas(raster);
    let color = Rgb(color.0);
    if radius == 0 {
        draw_line_segment_mut(&mut canvas, start, end, color);
    } else {
        for center in BresenhamLineIter::new(start, end) {
            draw_filled_circle_mut(&mut canvas, center, radius, color);
        }
    }
}

/// Draws the outline of the rectangle spanned by two opposite corners.
pub fn draw_rectangle(
    raster: &mut Raster,
    top_left: Point,
    bottom_right: Point,
    color: Color,
    thickness: u32,
) {
    if brush_radius(thickness) > 0 {
        let top_right = Point::new(bottom_right.x, top_left.y);
        let bottom_left = Point::new(top_left.x, bottom_right.y);
        draw_line(raster, top_left, top_right, color, thickness);
        draw_line(raster, top_right, bottom_right, color, thickness);
        draw_line(raster, bottom_right, bottom_left, color, thickness);
        draw_line(raster, bottom_left, top_left, color, thickness);
        return;
    }

    // Edges pulled in to one pixel outside the buffer stay invisible.
    let clamp = |v: i32, len: usize| v.clamp(-1, i32::try_from(len).unwrap_or(i32::MAX));
    let (w, h) = (raster.width(), raster.height());
    let (x0, x1) = (
        clamp(top_left.x.min(bottom_right.x), w),
        clamp(top_left.x.max(bottom_right.x), w),
    );
    let (y0, y1) = (
        clamp(top_left.y.min(bottom_right.y), h),
        clamp(top_left.y.max(bottom_right.y), h),
    );
    let outline = PixelRect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
    draw_hollow_rect_mut(&mut RasterCanvas(raster), outline, Rgb(color.0));
}

/// Width and height in pixels covered by `text`.
pub fn text_size(text: &str, style: &TextStyle) -> (u32, u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    let width = ((count - 1) * GLYPH_ADVANCE + GLYPH_WIDTH) * style.scale;
    (width, GLYPH_HEIGHT * style.scale)
}

/// Renders `text` with its bottom-left corner at `origin`.
///
/// The last glyph row ends on the row just above `origin.y`.
pub fn put_text(raster: &mut Raster, text: &str, origin: Point, style: &TextStyle) {
    if raster.width() == 0 || raster.height() == 0 {
        return;
    }
    let scale = style.scale.max(1);
    let step = i32::try_from(scale).unwrap_or(i32::MAX);
    let top = origin.y.saturating_sub((GLYPH_HEIGHT as i32).saturating_mul(step));
    let color = Rgb(style.color.0);
    let mut canvas = RasterCanvas(raster);

    for (index, ch) in text.chars().enumerate() {
        let glyph = font::glyph(ch);
        let advance = (index as i32).saturating_mul(GLYPH_ADVANCE as i32);
        let left = origin.x.saturating_add(advance.saturating_mul(step));
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !font::is_set(&glyph, col, row) {
                    continue;
                }
                let x = left.saturating_add((col as i32).saturating_mul(step));
                let y = top.saturating_add((row as i32).saturating_mul(step));
                draw_filled_rect_mut(&mut canvas, PixelRect::at(x, y).of_size(scale, scale), color);
            }
        }
    }
}
