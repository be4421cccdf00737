//! Foundation types for Vellum.
//!
//! This crate contains the leaf data types shared by all Vellum crates:
//! colors, rectangles, premultiplied pixel buffers, the control-state
//! snapshot handed to native rasterizers, and the error type.

pub mod color;
pub mod error;
pub mod geometry;
pub mod pixmap;
pub mod state;

pub use color::Color;
pub use error::{Result, SkinError};
pub use geometry::Rect;
pub use pixmap::Pixmap;
pub use state::{ControlSize, ControlState, Direction, Orientation, Presentation, WidgetKind};
