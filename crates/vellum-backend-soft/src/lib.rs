//! Software backend for Vellum.
//!
//! [`SoftCanvas`] is a CPU framebuffer implementing `DrawTarget`;
//! [`ProceduralRasterizer`] is a `NativeRasterizer` that draws controls
//! without any platform toolkit. Together they let the painters run
//! headless, for tests, benchmarks and the gallery binary.

pub mod canvas;
pub mod rasterizer;
pub mod shapes;


pub use canvas::SoftCanvas;
pub use rasterizer::{Palette, ProceduralRasterizer};
