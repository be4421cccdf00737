//! Nine-slice metrics and per-state metrics providers.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, SkinError};
use crate::geometry::Rect;
use crate::state::{ControlSize, ControlState, WidgetKind};

/// Largest template extent, in pixels, that still fits signed coordinates.
const MAX_EXTENT: u32 = i32::MAX as u32;

/// How a fixed-size template image decomposes into nine regions.
///
/// The template is `min_width` x `min_height`. The four cuts give the
/// corner sizes; edges stretch along one axis and the center (when shown)
/// along both. A region with zero extent is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct NineSliceMetrics {
    pub min_width: u32,
    pub min_height: u32,
    #[serde(default)]
    pub west: u32,
    #[serde(default)]
    pub east: u32,
    #[serde(default)]
    pub north: u32,
    #[serde(default)]
    pub south: u32,
    #[serde(default = "yes")]
    pub show_middle: bool,
    #[serde(default = "yes")]
    pub stretch_horizontally: bool,
    #[serde(default = "yes")]
    pub stretch_vertically: bool,
}

fn yes() -> bool {
    true
}

impl NineSliceMetrics {
    /// Metrics that show the middle and stretch along both axes.
    pub const fn new(
        min_width: u32,
        min_height: u32,
        west: u32,
        east: u32,
        north: u32,
        south: u32,
    ) -> Self {
        Self {
            min_width,
            min_height,
            west,
            east,
            north,
            south,
            show_middle: true,
            stretch_horizontally: true,
            stretch_vertically: true,
        }
    }

    pub const fn without_middle(mut self) -> Self {
        self.show_middle = false;
        self
    }

    pub const fn with_stretch(mut self, horizontally: bool, vertically: bool) -> Self {
        self.stretch_horizontally = horizontally;
        self.stretch_vertically = vertically;
        self
    }

    /// Check that the template is non-empty, fits signed pixel
    /// coordinates and the cuts fit inside it.
    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.min_height == 0 {
            return Err(SkinError::InvalidMetrics(format!(
                "template size {}x{} is empty",
                self.min_width, self.min_height
            )));
        }
        if self.min_width > MAX_EXTENT || self.min_height > MAX_EXTENT {
            return Err(SkinError::InvalidMetrics(format!(
                "template size {}x{} is out of range",
                self.min_width, self.min_height
            )));
        }
        if !self.west.checked_add(self.east).is_some_and(|sum| sum <= self.min_width) {
            return Err(SkinError::InvalidMetrics(format!(
                "west {} + east {} exceeds min_width {}",
                self.west, self.east, self.min_width
            )));
        }
        if !self.north.checked_add(self.south).is_some_and(|sum| sum <= self.min_height) {
            return Err(SkinError::InvalidMetrics(format!(
                "north {} + south {} exceeds min_height {}",
                self.north, self.south, self.min_height
            )));
        }
        Ok(())
    }

    /// Width of the north, center and south column.
    pub fn center_width(&self) -> u32 {
        self.min_width.saturating_sub(self.west.saturating_add(self.east))
    }

    /// Height of the west, center and east row.
    pub fn center_height(&self) -> u32 {
        self.min_height.saturating_sub(self.north.saturating_add(self.south))
    }

    /// The same metrics in device pixels for an integer backing scale.
    ///
    /// Fails with `InvalidMetrics` when the scaled template leaves the
    /// signed pixel range.
    pub fn scaled(&self, scale: u32) -> Result<Self> {
        let mul = |v: u32| {
            v.checked_mul(scale)
                .filter(|&d| d <= MAX_EXTENT)
                .ok_or_else(|| {
                    SkinError::InvalidMetrics(format!(
                        "{}x{} template overflows at scale {scale}",
                        self.min_width, self.min_height
                    ))
                })
        };
        Ok(Self {
            min_width: mul(self.min_width)?,
            min_height: mul(self.min_height)?,
            west: mul(self.west)?,
            east: mul(self.east)?,
            north: mul(self.north)?,
            south: mul(self.south)?,
            ..*self
        })
    }
}

/// Supplies nine-slice metrics for a control state, or `None` when the
/// state should be painted as a single scaled image.
pub trait SliceMetricsProvider {
    fn metrics_for(&self, state: &ControlState) -> Option<NineSliceMetrics>;
}

/// A single metrics value applies to every state.
impl SliceMetricsProvider for NineSliceMetrics {
    fn metrics_for(&self, _state: &ControlState) -> Option<NineSliceMetrics> {
        Some(*self)
    }
}

impl<F> SliceMetricsProvider for F
where
    F: Fn(&ControlState) -> Option<NineSliceMetrics>,
{
    fn metrics_for(&self, state: &ControlState) -> Option<NineSliceMetrics> {
        self(state)
    }
}

/// Registered metrics per widget kind, with optional per-size overrides.
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    by_kind: HashMap<WidgetKind, NineSliceMetrics>,
    by_kind_and_size: HashMap<(WidgetKind, ControlSize), NineSliceMetrics>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metrics for every size of a widget kind.
    pub fn insert(&mut self, kind: WidgetKind, metrics: NineSliceMetrics) {
        self.by_kind.insert(kind, metrics);
    }

    /// Register metrics for one size class; takes precedence over
    /// [`insert`](Self::insert).
    pub fn insert_sized(&mut self, kind: WidgetKind, size: ControlSize, metrics: NineSliceMetrics) {
        self.by_kind_and_size.insert((kind, size), metrics);
    }

    pub fn get(&self, state: &ControlState) -> Option<&NineSliceMetrics> {
        self.by_kind_and_size
            .get(&(state.kind, state.size))
            .or_else(|| self.by_kind.get(&state.kind))
    }

    pub fn len(&self) -> usize {
        self.by_kind.len() + self.by_kind_and_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty() && self.by_kind_and_size.is_empty()
    }
}

impl SliceMetricsProvider for MetricsTable {
    fn metrics_for(&self, state: &ControlState) -> Option<NineSliceMetrics> {
        self.get(state).copied()
    }
}

/// The nine regions of a sliced template, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceRegion {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl SliceRegion {
    pub const ALL: [SliceRegion; 9] = [
        SliceRegion::NorthWest,
        SliceRegion::North,
        SliceRegion::NorthEast,
        SliceRegion::West,
        SliceRegion::Center,
        SliceRegion::East,
        SliceRegion::SouthWest,
        SliceRegion::South,
        SliceRegion::SouthEast,
    ];

    /// Position in [`SliceRegion::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column (0 = west, 1 = center, 2 = east).
    pub fn column(self) -> usize {
        self.index() % 3
    }

    /// Row (0 = north, 1 = center, 2 = south).
    pub fn row(self) -> usize {
        self.index() / 3
    }
}

impl NineSliceMetrics {
    /// Source rectangle of a region within the template, or `None` when the
    /// region is omitted (zero extent, or the hidden center).
    pub fn source_rect(&self, region: SliceRegion) -> Option<Rect> {
        if region == SliceRegion::Center && !self.show_middle {
            return None;
        }
        let xs = [0, self.west, self.min_width - self.east];
        let ws = [self.west, self.center_width(), self.east];
        let ys = [0, self.north, self.min_height - self.south];
        let hs = [self.north, self.center_height(), self.south];
        let (c, r) = (region.column(), region.row());
        let rect = Rect::new(xs[c] as i32, ys[r] as i32, ws[c], hs[r]);
        (!rect.is_empty()).then_some(rect)
    }
}
