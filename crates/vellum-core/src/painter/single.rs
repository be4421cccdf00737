//! Direct painter: one cached image per destination size.

use std::sync::Arc;

use super::rasterize;
use crate::backend::{DrawTarget, NativeRasterizer};
use crate::cache::ImageCache;
use crate::config::PainterConfig;
use crate::error::Result;
use crate::geometry::Rect;
use crate::key::StateKey;
use crate::state::ControlState;

/// Rasterizes a control at exactly its destination size (plus a focus ring
/// margin) and reuses the image through the shared [`ImageCache`].
pub struct SingleImagePainter {
    cache: Arc<ImageCache>,
    rasterizer: Arc<dyn NativeRasterizer>,
    config: PainterConfig,
}

impl SingleImagePainter {
    pub fn new(cache: Arc<ImageCache>, rasterizer: Arc<dyn NativeRasterizer>) -> Self {
        Self::with_config(cache, rasterizer, PainterConfig::default())
    }

    pub fn with_config(
        cache: Arc<ImageCache>,
        rasterizer: Arc<dyn NativeRasterizer>,
        config: PainterConfig,
    ) -> Self {
        Self {
            cache,
            rasterizer,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    pub fn rasterizer(&self) -> &Arc<dyn NativeRasterizer> {
        &self.rasterizer
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    /// Paint `state` into `(x, y, w, h)`.
    ///
    /// Focused controls get `focus_ring_margin` extra pixels on every side
    /// so the rasterizer can draw the ring outside the control bounds.
    pub fn paint(
        &self,
        target: &mut dyn DrawTarget,
        state: &ControlState,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<()> {
        let Some(bounds) = Rect::from_signed(x, y, w, h) else {
            return Ok(());
        };
        let margin = if state.focused {
            self.config.focus_ring_margin
        } else {
            0
        };
        let scale = target.scale_factor().max(1);
        let outer = bounds.outset(margin);
        let device = |v: u32| v.checked_mul(scale);
        let sizes = (
            device(outer.w),
            device(outer.h),
            device(margin).and_then(|m| i32::try_from(m).ok()),
            device(bounds.w),
            device(bounds.h),
        );
        let (Some(pw), Some(ph), Some(inset), Some(dw), Some(dh)) = sizes else {
            log::warn!(
                "{:?} at {}x{} does not fit a buffer at scale {scale}",
                state.kind,
                outer.w,
                outer.h
            );
            return Ok(());
        };

        let key = StateKey::new(target.context_id(), pw, ph, bounds, state.clone());
        if let Some(image) = self.cache.get(&key) {
            return target.draw_pixmap(&image, outer);
        }

        log::debug!("cache miss for {:?} at {pw}x{ph}", state.kind);
        let dest = Rect::new(inset, inset, dw, dh);
        let Some(image) = rasterize(self.rasterizer.as_ref(), state, pw, ph, dest) else {
            return Ok(());
        };
        let image = Arc::new(image);
        self.cache.put(key, Arc::clone(&image));
        target.draw_pixmap(&image, outer)
    }
}
