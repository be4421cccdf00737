//! Control painters.
//!
//! [`SingleImagePainter`] rasterizes a control at its destination size and
//! caches the result; [`NineSlicingPainter`] rasterizes a fixed-size
//! template once and nine-slices it into any destination. [`Painter`]
//! picks one per control family behind a single `paint` call.

mod single;
mod sliced;

pub use single::SingleImagePainter;
pub use sliced::NineSlicingPainter;

use std::sync::Arc;

use crate::backend::{DrawTarget, NativeRasterizer};
use crate::cache::ImageCache;
use crate::config::{PainterConfig, SkinConfig};
use crate::error::Result;
use crate::geometry::Rect;
use crate::metrics::SliceMetricsProvider;
use crate::pixmap::Pixmap;
use crate::state::ControlState;

/// A painter for one family of controls.
pub enum Painter {
    /// Rasterize at the destination size.
    Direct(SingleImagePainter),
    /// Rasterize a template and nine-slice it.
    Sliced(NineSlicingPainter),
}

impl Painter {
    pub fn direct(
        cache: Arc<ImageCache>,
        rasterizer: Arc<dyn NativeRasterizer>,
        config: PainterConfig,
    ) -> Self {
        Self::Direct(SingleImagePainter::with_config(cache, rasterizer, config))
    }

    pub fn sliced(
        cache: Arc<ImageCache>,
        rasterizer: Arc<dyn NativeRasterizer>,
        config: PainterConfig,
        provider: impl SliceMetricsProvider + Send + Sync + 'static,
    ) -> Self {
        let fallback = SingleImagePainter::with_config(cache, rasterizer, config);
        Self::Sliced(NineSlicingPainter::new(fallback, provider))
    }

    /// Build a sliced painter from a skin: its painter settings and its
    /// metrics table. Widgets without metrics fall back to direct painting.
    pub fn from_skin(
        skin: &SkinConfig,
        cache: Arc<ImageCache>,
        rasterizer: Arc<dyn NativeRasterizer>,
    ) -> Result<Self> {
        let table = skin.metrics_table()?;
        log::info!("skin loaded with {} metrics entries", table.len());
        Ok(Self::sliced(cache, rasterizer, skin.painter.clone(), table))
    }

    /// Paint `state` into `(x, y, w, h)` on `target`. A zero or negative
    /// extent paints nothing.
    pub fn paint(
        &self,
        target: &mut dyn DrawTarget,
        state: &ControlState,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<()> {
        match self {
            Self::Direct(p) => p.paint(target, state, x, y, w, h),
            Self::Sliced(p) => p.paint(target, state, x, y, w, h),
        }
    }
}

/// Allocate a zeroed buffer and ask the rasterizer to fill it.
///
/// Failures are logged and reported as `None`: the caller draws nothing
/// and caches nothing, so the next paint retries.
fn rasterize(
    rasterizer: &dyn NativeRasterizer,
    state: &ControlState,
    width: u32,
    height: u32,
    dest: Rect,
) -> Option<Pixmap> {
    let mut buffer = match Pixmap::new(width, height) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("cannot allocate {width}x{height} buffer for {:?}: {e}", state.kind);
            return None;
        }
    };
    match rasterizer.rasterize(state, &mut buffer, dest) {
        Ok(()) => Some(buffer),
        Err(e) => {
            log::warn!("rasterizing {:?} at {width}x{height} failed: {e}", state.kind);
            None
        }
    }
}
