//! Shared test utilities for vellum-core painter tests.
//!
//! Provides a [`MockTarget`] that records all draw calls for assertion and
//! rasterizer stubs that count invocations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{ContextId, DrawTarget, NativeRasterizer};
use crate::color::Color;
use crate::error::{Result, SkinError};
use crate::geometry::Rect;
use crate::pixmap::Pixmap;
use crate::state::ControlState;

/// A recorded draw call from the mock target.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawCall {
    DrawPixmap {
        width: u32,
        height: u32,
        dst: Rect,
        /// Address of the pixel data, identifies a shared cached image.
        data_ptr: usize,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Clear(Color),
}

/// A mock target that records all draw calls for test assertions.
pub struct MockTarget {
    pub context: ContextId,
    pub scale: u32,
    pub calls: Vec<DrawCall>,
}

impl MockTarget {
    pub fn new() -> Self {
        Self {
            context: ContextId::next(),
            scale: 1,
            calls: Vec::new(),
        }
    }

    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale,
            ..Self::new()
        }
    }

    /// Return only the `DrawPixmap` entries as `(width, height, dst, data_ptr)`.
    pub fn pixmap_draws(&self) -> Vec<(u32, u32, Rect, usize)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::DrawPixmap {
                    width,
                    height,
                    dst,
                    data_ptr,
                } => Some((*width, *height, *dst, *data_ptr)),
                _ => None,
            })
            .collect()
    }

    /// Destination rectangles of all `DrawPixmap` calls, in call order.
    pub fn drawn_rects(&self) -> Vec<Rect> {
        self.pixmap_draws().into_iter().map(|d| d.2).collect()
    }
}

impl DrawTarget for MockTarget {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn draw_pixmap(&mut self, image: &Pixmap, dst: Rect) -> Result<()> {
        self.calls.push(DrawCall::DrawPixmap {
            width: image.width(),
            height: image.height(),
            dst,
            data_ptr: image.data().as_ptr() as usize,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect { rect, color });
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Clear(color));
        Ok(())
    }

    fn read_pixels(&self, rect: Rect) -> Result<Vec<u8>> {
        Ok(vec![0; rect.w as usize * rect.h as usize * 4])
    }

    fn scale_factor(&self) -> u32 {
        self.scale
    }
}

/// Rasterizer stub that fills `dest` with a solid color and counts calls.
///
/// Optionally fails its first `fail_first` invocations.
pub struct CountingRasterizer {
    color: Color,
    calls: AtomicUsize,
    fail_first: usize,
    requests: Mutex<Vec<(u32, u32, Rect)>>,
}

impl CountingRasterizer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            calls: AtomicUsize::new(0),
            fail_first: 0,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A rasterizer that errors on its first `n` calls, then succeeds.
    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: n,
            ..Self::new(Color::WHITE)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(buffer width, buffer height, dest)` for every call, in order.
    pub fn requests(&self) -> Vec<(u32, u32, Rect)> {
        self.requests.lock().unwrap().clone()
    }
}

impl NativeRasterizer for CountingRasterizer {
    fn rasterize(&self, _state: &ControlState, buffer: &mut Pixmap, dest: Rect) -> Result<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((buffer.width(), buffer.height(), dest));
        if n < self.fail_first {
            return Err(SkinError::Rasterize("stub failure".into()));
        }
        buffer.fill_rect(dest, self.color);
        Ok(())
    }
}

/// Rasterizer stub that always fails.
pub struct FailingRasterizer;

impl NativeRasterizer for FailingRasterizer {
    fn rasterize(&self, _state: &ControlState, _buffer: &mut Pixmap, _dest: Rect) -> Result<()> {
        Err(SkinError::Rasterize("native call failed".into()))
    }
}
