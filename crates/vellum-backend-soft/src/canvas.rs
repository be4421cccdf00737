//! Software RGBA framebuffer draw target.
//!
//! Implements `DrawTarget` by drawing into a premultiplied [`Pixmap`]. The
//! canvas is sized in logical pixels; its backing surface holds
//! `scale_factor` device pixels per logical pixel, and all drawing
//! coordinates are logical.

use vellum_core::color::{Color, blend_over};
use vellum_core::error::{Result, SkinError};
use vellum_core::geometry::Rect;
use vellum_core::pixmap::Pixmap;
use vellum_core::{ContextId, DrawTarget};

/// Software framebuffer with a clip stack and an integer backing scale.
pub struct SoftCanvas {
    context: ContextId,
    width: u32,
    height: u32,
    scale: u32,
    surface: Pixmap,
    /// Effective clip in device pixels; `None` means the whole surface.
    clip: Option<Rect>,
    clip_stack: Vec<Option<Rect>>,
}

impl SoftCanvas {
    /// Create a 1x canvas of the given logical size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_scale(width, height, 1)
    }

    /// Create a canvas whose backing store has `scale` device pixels per
    /// logical pixel.
    pub fn with_scale(width: u32, height: u32, scale: u32) -> Result<Self> {
        if scale == 0 {
            return Err(SkinError::Backend("scale factor must be at least 1".into()));
        }
        let surface = Pixmap::new(width * scale, height * scale)?;
        log::debug!("soft canvas {width}x{height} at scale {scale}");
        Ok(Self {
            context: ContextId::next(),
            width,
            height,
            scale,
            surface,
            clip: None,
            clip_stack: Vec::new(),
        })
    }

    /// Logical dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The device-pixel backing store.
    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    pub fn into_surface(self) -> Pixmap {
        self.surface
    }

    /// Device-pixel region a logical rectangle covers after clipping, or
    /// `None` when nothing is visible.
    fn visible(&self, logical: Rect) -> Option<(Rect, Rect)> {
        let device = logical.scaled(self.scale);
        let mut area = device.intersect(&self.surface.bounds())?;
        if let Some(clip) = &self.clip {
            area = area.intersect(clip)?;
        }
        Some((device, area))
    }
}

impl DrawTarget for SoftCanvas {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn draw_pixmap(&mut self, image: &Pixmap, dst: Rect) -> Result<()> {
        let Some((device, area)) = self.visible(dst) else {
            return Ok(());
        };
        let (iw, ih) = (image.width() as u64, image.height() as u64);
        let (dw, dh) = (device.w as u64, device.h as u64);
        let stride = self.surface.width() as usize * 4;
        let data = self.surface.data_mut();
        for y in area.y..area.bottom() {
            let sy = ((y - device.y) as u64 * ih / dh) as u32;
            let row = y as usize * stride;
            for x in area.x..area.right() {
                // Nearest-neighbour sampling.
                let sx = ((x - device.x) as u64 * iw / dw) as u32;
                let o = row + x as usize * 4;
                blend_over(&mut data[o..o + 4], image.pixel(sx, sy));
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        let Some((_, area)) = self.visible(rect) else {
            return Ok(());
        };
        let px = color.to_premultiplied();
        let stride = self.surface.width() as usize * 4;
        let data = self.surface.data_mut();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let o = y as usize * stride + x as usize * 4;
                blend_over(&mut data[o..o + 4], px);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.surface.fill(color);
        Ok(())
    }

    /// Reads device pixels: the result is `rect.w * scale` by
    /// `rect.h * scale`, with pixels outside the surface left transparent.
    fn read_pixels(&self, rect: Rect) -> Result<Vec<u8>> {
        let device = rect.scaled(self.scale);
        let mut out = vec![0u8; device.w as usize * device.h as usize * 4];
        for row in 0..device.h {
            let sy = device.y + row as i32;
            if sy < 0 {
                continue;
            }
            for col in 0..device.w {
                let sx = device.x + col as i32;
                if sx < 0 {
                    continue;
                }
                let c = self.surface.color_at(sx as u32, sy as u32);
                let o = (row as usize * device.w as usize + col as usize) * 4;
                out[o..o + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        Ok(out)
    }

    fn scale_factor(&self) -> u32 {
        self.scale
    }

    fn push_clip_rect(&mut self, rect: Rect) -> Result<()> {
        let device = rect.scaled(self.scale);
        self.clip_stack.push(self.clip);
        let next = match self.clip {
            Some(current) => current.intersect(&device).unwrap_or_default(),
            None => device,
        };
        self.clip = Some(next);
        Ok(())
    }

    fn pop_clip_rect(&mut self) -> Result<()> {
        match self.clip_stack.pop() {
            Some(prev) => self.clip = prev,
            None => log::warn!("pop_clip_rect with an empty clip stack"),
        }
        Ok(())
    }
}
