//! Software shape primitives drawn straight into a [`Pixmap`].
//!
//! Every primitive blends source-over and silently drops pixels outside
//! the buffer.

use vellum_core::color::Color;
use vellum_core::geometry::Rect;
use vellum_core::pixmap::Pixmap;

/// Direction of a two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientAxis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Draw a horizontal span (inclusive on both ends).
pub fn hline(p: &mut Pixmap, x1: i32, x2: i32, y: i32, color: Color) {
    for x in x1.min(x2)..=x1.max(x2) {
        p.blend_pixel(x, y, color);
    }
}

/// Horizontal inset of row `row` (0 = top edge) of a rounded rectangle
/// with corner radius `r` and height `h`.
fn corner_inset(r: i32, h: i32, row: i32) -> i32 {
    let from_edge = row.min(h - 1 - row);
    if from_edge >= r {
        return 0;
    }
    let dy = r as f32 - from_edge as f32 - 0.5;
    let dx = (r as f32 * r as f32 - dy * dy).max(0.0).sqrt();
    (r as f32 - dx).round() as i32
}

fn clamp_radius(rect: Rect, radius: u32) -> i32 {
    radius.min(rect.w / 2).min(rect.h / 2) as i32
}

/// Fill a rounded rectangle with a two-stop gradient.
pub fn fill_rounded_gradient(
    p: &mut Pixmap,
    rect: Rect,
    radius: u32,
    start: Color,
    end: Color,
    axis: GradientAxis,
) {
    if rect.is_empty() {
        return;
    }
    let r = clamp_radius(rect, radius);
    let (w, h) = (rect.w as i32, rect.h as i32);
    for row in 0..h {
        let inset = corner_inset(r, h, row);
        for col in inset..(w - inset) {
            let color = match axis {
                GradientAxis::Vertical => Color::lerp(start, end, row as u32, (h - 1).max(1) as u32),
                GradientAxis::Horizontal => {
                    Color::lerp(start, end, col as u32, (w - 1).max(1) as u32)
                }
            };
            p.blend_pixel(rect.x + col, rect.y + row, color);
        }
    }
}

/// Fill a rounded rectangle with one color.
pub fn fill_rounded_rect(p: &mut Pixmap, rect: Rect, radius: u32, color: Color) {
    fill_rounded_gradient(p, rect, radius, color, color, GradientAxis::Vertical);
}

/// One-pixel outline of a rounded rectangle.
pub fn stroke_rounded_rect(p: &mut Pixmap, rect: Rect, radius: u32, color: Color) {
    if rect.is_empty() {
        return;
    }
    let r = clamp_radius(rect, radius);
    let (w, h) = (rect.w as i32, rect.h as i32);
    let mut prev_inset = corner_inset(r, h, 0);
    for row in 0..h {
        let inset = corner_inset(r, h, row);
        let y = rect.y + row;
        let (left, right) = (rect.x + inset, rect.x + w - 1 - inset);
        if row == 0 || row == h - 1 {
            hline(p, left, right, y, color);
        } else {
            // Close the gap where the curve steps inward or outward.
            let next = corner_inset(r, h, row + 1);
            let reach = prev_inset.max(next).max(inset);
            hline(p, left, rect.x + reach, y, color);
            hline(p, rect.x + w - 1 - reach, right, y, color);
        }
        prev_inset = inset;
    }
}

/// Filled circle made of horizontal spans.
pub fn fill_circle(p: &mut Pixmap, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        p.blend_pixel(cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        let dx = ((r2 - dy * dy) as f32).sqrt() as i32;
        hline(p, cx - dx, cx + dx, cy + dy, color);
    }
}

/// Filled triangle, sampled at pixel centers.
pub fn fill_triangle(p: &mut Pixmap, pts: [(i32, i32); 3], color: Color) {
    let edge = |a: (i32, i32), b: (i32, i32), x: i64, y: i64| -> i64 {
        let (ax, ay) = (a.0 as i64, a.1 as i64);
        let (bx, by) = (b.0 as i64, b.1 as i64);
        (bx - ax) * (y - ay * 2) - (by - ay) * (x - ax * 2)
    };
    let min_x = pts.iter().map(|pt| pt.0).min().unwrap_or(0);
    let max_x = pts.iter().map(|pt| pt.0).max().unwrap_or(0);
    let min_y = pts.iter().map(|pt| pt.1).min().unwrap_or(0);
    let max_y = pts.iter().map(|pt| pt.1).max().unwrap_or(0);
    let [a, b, c] = pts;
    for y in min_y..max_y {
        for x in min_x..max_x {
            // Doubled coordinates of the pixel center.
            let (sx, sy) = (x as i64 * 2 + 1, y as i64 * 2 + 1);
            let w0 = edge(a, b, sx, sy);
            let w1 = edge(b, c, sx, sy);
            let w2 = edge(c, a, sx, sy);
            let inside = (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0);
            if inside {
                p.blend_pixel(x, y, color);
            }
        }
    }
}

/// Thick line made of square brushes (Bresenham).
pub fn draw_line(p: &mut Pixmap, from: (i32, i32), to: (i32, i32), width: i32, color: Color) {
    let (mut cx, mut cy) = from;
    let dx = (to.0 - cx).abs();
    let dy = -(to.1 - cy).abs();
    let sx = if cx < to.0 { 1 } else { -1 };
    let sy = if cy < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let half = width.max(1) / 2;
    let span = width.max(1) - half - 1;
    loop {
        for wy in -half..=span {
            for wx in -half..=span {
                p.blend_pixel(cx + wx, cy + wy, color);
            }
        }
        if cx == to.0 && cy == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
}
