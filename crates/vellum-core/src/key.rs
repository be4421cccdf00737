//! Cache keys for rasterized control images.

use crate::backend::ContextId;
use crate::geometry::Rect;
use crate::state::ControlState;

/// Identifies one rasterization: which context, at which pixel size, for
/// which logical bounds, in which control state.
///
/// Equality and hashing cover every field in declaration order, so two
/// keys built from identical arguments are interchangeable and any single
/// differing field (down to the animation frame) makes them distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    context: ContextId,
    width: u32,
    height: u32,
    bounds: Rect,
    state: ControlState,
}

impl StateKey {
    pub fn new(
        context: ContextId,
        width: u32,
        height: u32,
        bounds: Rect,
        state: ControlState,
    ) -> Self {
        Self {
            context,
            width,
            height,
            bounds,
            state,
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Pixel width of the rasterized image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height of the rasterized image.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Pixel cost of the image this key describes.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
