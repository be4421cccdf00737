//! Vellum core: the scalable control image compositor.
//!
//! Painters ask a [`NativeRasterizer`](backend::NativeRasterizer) to draw a
//! control into a pixel buffer, cache the result in a shared
//! [`ImageCache`](cache::ImageCache), and scale it into arbitrary
//! destination rectangles, either directly or through a nine-slice
//! decomposition. All drawing goes through the
//! [`DrawTarget`](backend::DrawTarget) trait -- no platform-specific code.

// Re-exports from vellum-types (foundation types).
pub use vellum_types::color;
pub use vellum_types::error;
pub use vellum_types::geometry;
pub use vellum_types::pixmap;
pub use vellum_types::state;

pub mod backend;
pub mod cache;
pub mod config;
pub mod key;
pub mod metrics;
pub mod painter;
pub mod slice;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::{ContextId, DrawTarget, NativeRasterizer};
pub use cache::{CacheStats, ImageCache};
pub use config::{CacheConfig, PainterConfig, SkinConfig};
pub use key::StateKey;
pub use metrics::{MetricsTable, NineSliceMetrics, SliceMetricsProvider, SliceRegion};
pub use painter::{NineSlicingPainter, Painter, SingleImagePainter};
pub use slice::{CompositeMode, Placement, SlicedImageControl};
