//! Backend trait definitions.
//!
//! The compositor talks to the outside world through two trait boundaries:
//! [`NativeRasterizer`] produces control images, [`DrawTarget`] consumes
//! them. Neither the painters nor the cache ever call platform APIs.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;
use crate::pixmap::Pixmap;
use crate::state::ControlState;

/// Opaque identity of a rendering context (device, surface, or graphics
/// configuration). Only compared and hashed, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

impl ContextId {
    /// Allocate a process-unique context identity.
    pub fn next() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Native control rasterizer.
///
/// Given a control state, fill `buffer` with a rendering of the control
/// occupying `dest`. The caller guarantees the buffer is zero-initialized
/// (premultiplied transparent) and large enough; `dest` may be inset within
/// it to leave room for a focus ring, which the rasterizer may draw into the
/// surrounding margin.
///
/// Implementations are called synchronously from the rendering thread and
/// may be expensive.
pub trait NativeRasterizer: Send + Sync {
    fn rasterize(&self, state: &ControlState, buffer: &mut Pixmap, dest: Rect) -> Result<()>;
}

/// Rendering target trait.
///
/// # Core Methods (required)
///
/// `context_id`, `draw_pixmap`, `fill_rect`, `clear`, and `read_pixels`.
///
/// # Extended Methods (optional, with defaults)
///
/// `scale_factor` for HiDPI backing stores and a clip stack. Defaults
/// describe a 1x target without clipping.
pub trait DrawTarget {
    // -----------------------------------------------------------------------
    // Core methods (required -- no default implementations)
    // -----------------------------------------------------------------------

    /// Identity of this target, part of every cache key.
    fn context_id(&self) -> ContextId;

    /// Draw a whole image scaled into `dst` (logical coordinates), blending
    /// source-over.
    fn draw_pixmap(&mut self, image: &Pixmap, dst: Rect) -> Result<()>;

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Clear the whole target to a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Read back straight-alpha RGBA pixel data.
    fn read_pixels(&self, rect: Rect) -> Result<Vec<u8>>;

    // -----------------------------------------------------------------------
    // Extended
    // -----------------------------------------------------------------------

    /// Device pixels per logical pixel. Images are rasterized at this
    /// multiple of their logical size.
    fn scale_factor(&self) -> u32 {
        1
    }

    /// Push a clip rectangle onto the clip stack.
    ///
    /// The effective clip is the intersection of all pushed rects.
    fn push_clip_rect(&mut self, rect: Rect) -> Result<()> {
        let _ = rect;
        Ok(())
    }

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip_rect(&mut self) -> Result<()> {
        Ok(())
    }
}
