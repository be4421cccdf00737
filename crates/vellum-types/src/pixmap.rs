//! Premultiplied RGBA pixel buffers.
//!
//! A [`Pixmap`] is the unit of exchange between native rasterizers, the
//! image cache and draw targets. Pixels are stored row-major, four bytes
//! per pixel, with color channels premultiplied by alpha.

use crate::color::{self, Color};
use crate::error::{Result, SkinError};
use crate::geometry::Rect;

/// Largest buffer edge accepted by [`Pixmap::new`].
pub const MAX_DIMENSION: u32 = 16384;

/// An owned premultiplied RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Pixmap {
    /// Allocate a zero-initialized (fully transparent) buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SkinError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        })
    }

    /// Wrap existing premultiplied RGBA bytes.
    pub fn from_premultiplied(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != (width as usize * height as usize * 4) {
            return Err(SkinError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (the unit the image cache budgets in).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The full bounds of the buffer, origin at zero.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Raw premultiplied bytes of one pixel. Out-of-range reads are
    /// transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let o = self.offset(x, y);
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    /// Straight-alpha color of one pixel.
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        Color::from_premultiplied(self.pixel(x, y))
    }

    /// Overwrite one pixel with premultiplied bytes.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&px);
    }

    /// Source-over blend one straight-alpha color onto a pixel.
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let o = self.offset(x as u32, y as u32);
        color::blend_over(&mut self.data[o..o + 4], c.to_premultiplied());
    }

    /// Fill every pixel with one color (no blending).
    pub fn fill(&mut self, c: Color) {
        let px = c.to_premultiplied();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Overwrite a rectangle with one color (no blending), clipped to the
    /// buffer.
    pub fn fill_rect(&mut self, rect: Rect, c: Color) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        let px = c.to_premultiplied();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let o = self.offset(x as u32, y as u32);
                self.data[o..o + 4].copy_from_slice(&px);
            }
        }
    }

    /// Copy a sub-rectangle into a new buffer of the same size, 1:1.
    ///
    /// Returns `None` when the rectangle is empty; an error when it is not
    /// contained in this buffer.
    pub fn copy_region(&self, src: Rect) -> Result<Option<Pixmap>> {
        if src.is_empty() {
            return Ok(None);
        }
        if !self.bounds().contains_rect(&src) {
            return Err(SkinError::InvalidSize {
                width: src.w,
                height: src.h,
            });
        }
        let mut out = Pixmap::new(src.w, src.h)?;
        let row_bytes = (src.w * 4) as usize;
        for row in 0..src.h {
            let from = self.offset(src.x as u32, src.y as u32 + row);
            let to = (row * src.w * 4) as usize;
            out.data[to..to + row_bytes].copy_from_slice(&self.data[from..from + row_bytes]);
        }
        Ok(Some(out))
    }

    /// Convert to straight-alpha RGBA bytes (for PNG export).
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(4) {
            let c = Color::from_premultiplied([chunk[0], chunk[1], chunk[2], chunk[3]]);
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_transparent() {
        let p = Pixmap::new(3, 2).unwrap();
        assert_eq!(p.data().len(), 24);
        assert!(p.data().iter().all(|&b| b == 0));
        assert_eq!(p.pixel_count(), 6);
    }

    #[test]
    fn new_rejects_zero_and_huge() {
        assert!(Pixmap::new(0, 4).is_err());
        assert!(Pixmap::new(4, 0).is_err());
        assert!(Pixmap::new(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn from_premultiplied_checks_length() {
        assert!(Pixmap::from_premultiplied(2, 2, vec![0; 16]).is_ok());
        assert!(Pixmap::from_premultiplied(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut p = Pixmap::new(4, 4).unwrap();
        p.fill_rect(Rect::new(-2, -2, 4, 4), Color::rgb(255, 0, 0));
        assert_eq!(p.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(p.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(p.pixel(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn copy_region_is_exact() {
        let mut p = Pixmap::new(6, 6).unwrap();
        p.fill_rect(Rect::new(2, 1, 3, 2), Color::rgb(0, 255, 0));
        let sub = p.copy_region(Rect::new(2, 1, 3, 2)).unwrap().unwrap();
        assert_eq!(sub.width(), 3);
        assert_eq!(sub.height(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(sub.pixel(x, y), [0, 255, 0, 255]);
            }
        }
    }

    #[test]
    fn copy_region_empty_is_none() {
        let p = Pixmap::new(4, 4).unwrap();
        assert!(p.copy_region(Rect::new(0, 0, 0, 4)).unwrap().is_none());
    }

    #[test]
    fn copy_region_out_of_bounds_fails() {
        let p = Pixmap::new(4, 4).unwrap();
        assert!(p.copy_region(Rect::new(2, 2, 3, 1)).is_err());
    }

    #[test]
    fn out_of_range_pixel_is_transparent() {
        let p = Pixmap::new(2, 2).unwrap();
        assert_eq!(p.pixel(5, 0), [0; 4]);
    }

    #[test]
    fn blend_pixel_ignores_negative() {
        let mut p = Pixmap::new(2, 2).unwrap();
        p.blend_pixel(-1, 0, Color::WHITE);
        p.blend_pixel(1, 1, Color::WHITE);
        assert_eq!(p.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!(p.pixel(0, 0), [0; 4]);
    }

    #[test]
    fn straight_export_unpremultiplies() {
        let mut p = Pixmap::new(1, 1).unwrap();
        p.put_pixel(0, 0, [64, 0, 0, 128]);
        let out = p.to_straight_rgba();
        assert_eq!(out[3], 128);
        assert!((out[0] as i32 - 128).abs() <= 1);
    }
}
