//! Nine-slice decomposition of a template image and compositing into
//! arbitrary destination rectangles.

use crate::backend::DrawTarget;
use crate::error::{Result, SkinError};
use crate::geometry::Rect;
use crate::metrics::{NineSliceMetrics, SliceRegion};
use crate::pixmap::Pixmap;

/// How a sliced control fills its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Destination at least the template size: corners native, edges and
    /// center stretched.
    Stretch,
    /// Destination smaller than the template on some axis: cuts scaled
    /// down proportionally.
    Compress,
}

/// Where one slice lands in the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub region: SliceRegion,
    pub dst: Rect,
}

/// A template image pre-cut into up to nine slices.
///
/// Immutable once built; shared between paints through `Arc`.
pub struct SlicedImageControl {
    metrics: NineSliceMetrics,
    scale: u32,
    slices: [Option<Pixmap>; 9],
}

impl SlicedImageControl {
    /// Slice a 1x template.
    pub fn new(template: &Pixmap, metrics: NineSliceMetrics) -> Result<Self> {
        Self::with_scale(template, metrics, 1)
    }

    /// Slice a template rasterized at `scale` device pixels per logical
    /// pixel. `metrics` are logical; the template must measure exactly
    /// `min_width * scale` by `min_height * scale`.
    pub fn with_scale(template: &Pixmap, metrics: NineSliceMetrics, scale: u32) -> Result<Self> {
        metrics.validate()?;
        let scale = scale.max(1);
        let device = metrics.scaled(scale)?;
        if template.width() != device.min_width || template.height() != device.min_height {
            return Err(SkinError::MetricsMismatch {
                expected_width: device.min_width,
                expected_height: device.min_height,
                actual_width: template.width(),
                actual_height: template.height(),
            });
        }

        let mut slices: [Option<Pixmap>; 9] = Default::default();
        for region in SliceRegion::ALL {
            if let Some(src) = device.source_rect(region) {
                slices[region.index()] = template.copy_region(src)?;
            }
        }
        log::debug!(
            "sliced {}x{} template (cuts w{} e{} n{} s{}, scale {scale})",
            template.width(),
            template.height(),
            metrics.west,
            metrics.east,
            metrics.north,
            metrics.south,
        );
        Ok(Self {
            metrics,
            scale,
            slices,
        })
    }

    pub fn metrics(&self) -> &NineSliceMetrics {
        &self.metrics
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The extracted image for a region, `None` if the region is omitted.
    pub fn slice(&self, region: SliceRegion) -> Option<&Pixmap> {
        self.slices[region.index()].as_ref()
    }

    /// Number of regions actually present.
    pub fn slice_count(&self) -> usize {
        self.slices.iter().filter(|s| s.is_some()).count()
    }

    pub fn mode_for(&self, w: u32, h: u32) -> CompositeMode {
        if w < self.metrics.min_width || h < self.metrics.min_height {
            CompositeMode::Compress
        } else {
            CompositeMode::Stretch
        }
    }

    /// Compute where every present slice lands for a destination of
    /// `w` x `h` at `(x, y)`. Empty for a degenerate destination.
    pub fn layout(&self, x: i32, y: i32, w: i32, h: i32) -> Vec<Placement> {
        let Some(dst) = Rect::from_signed(x, y, w, h) else {
            return Vec::new();
        };
        let mode = self.mode_for(dst.w, dst.h);
        let m = &self.metrics;
        let columns = axis_segments(
            dst.x,
            dst.w,
            Axis {
                template: m.min_width,
                near: m.west,
                far: m.east,
                stretch: m.stretch_horizontally,
            },
            mode,
        );
        let rows = axis_segments(
            dst.y,
            dst.h,
            Axis {
                template: m.min_height,
                near: m.north,
                far: m.south,
                stretch: m.stretch_vertically,
            },
            mode,
        );

        let mut out = Vec::with_capacity(9);
        for region in SliceRegion::ALL {
            if self.slice(region).is_none() {
                continue;
            }
            let (px, pw) = columns[region.column()];
            let (py, ph) = rows[region.row()];
            if pw == 0 || ph == 0 {
                continue;
            }
            out.push(Placement {
                region,
                dst: Rect::new(px, py, pw, ph),
            });
        }
        out
    }

    /// Draw the control into `(x, y, w, h)` on `target`.
    pub fn composite(
        &self,
        target: &mut dyn DrawTarget,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<()> {
        for placement in self.layout(x, y, w, h) {
            if let Some(image) = self.slice(placement.region) {
                target.draw_pixmap(image, placement.dst)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SlicedImageControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlicedImageControl")
            .field("metrics", &self.metrics)
            .field("scale", &self.scale)
            .field("slices", &self.slice_count())
            .finish()
    }
}

/// Template measurements along one axis.
struct Axis {
    template: u32,
    near: u32,
    far: u32,
    stretch: bool,
}

/// Split one destination axis into near, center and far `(offset, extent)`
/// segments.
fn axis_segments(origin: i32, dst: u32, axis: Axis, mode: CompositeMode) -> [(i32, u32); 3] {
    let (start, extent, near, far) = match mode {
        CompositeMode::Stretch if axis.stretch => (origin, dst, axis.near, axis.far),
        CompositeMode::Stretch => {
            let base = origin + dst as i32 / 2 - axis.template as i32 / 2;
            (base, axis.template, axis.near, axis.far)
        }
        CompositeMode::Compress => {
            let (near, far) = if dst < axis.template {
                (
                    scale_round(axis.near, dst, axis.template),
                    scale_round(axis.far, dst, axis.template),
                )
            } else {
                (axis.near, axis.far)
            };
            let far = far.min(dst.saturating_sub(near));
            (origin, dst, near, far)
        }
    };
    let center = extent.saturating_sub(near + far);
    [
        (start, near),
        (start + near as i32, center),
        (start + (extent - far) as i32, far),
    ]
}

/// `cut * dst / template`, rounded half up.
fn scale_round(cut: u32, dst: u32, template: u32) -> u32 {
    let (cut, dst, template) = (cut as u64, dst as u64, template as u64);
    ((cut * dst * 2 + template) / (template * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::test_utils::MockTarget;

    const BUTTON: NineSliceMetrics = NineSliceMetrics::new(18, 18, 4, 4, 4, 4);

    fn template(w: u32, h: u32) -> Pixmap {
        let mut p = Pixmap::new(w, h).unwrap();
        p.fill(Color::rgb(90, 120, 200));
        p
    }

    fn control(metrics: NineSliceMetrics) -> SlicedImageControl {
        SlicedImageControl::new(&template(metrics.min_width, metrics.min_height), metrics)
            .unwrap()
    }

    fn placement_of(layout: &[Placement], region: SliceRegion) -> Option<Rect> {
        layout.iter().find(|p| p.region == region).map(|p| p.dst)
    }

    #[test]
    fn slices_have_template_sizes() {
        let c = control(BUTTON);
        assert_eq!(c.slice_count(), 9);
        let nw = c.slice(SliceRegion::NorthWest).unwrap();
        assert_eq!((nw.width(), nw.height()), (4, 4));
        let center = c.slice(SliceRegion::Center).unwrap();
        assert_eq!((center.width(), center.height()), (10, 10));
        let north = c.slice(SliceRegion::North).unwrap();
        assert_eq!((north.width(), north.height()), (10, 4));
    }

    #[test]
    fn stretch_into_40x30() {
        let c = control(BUTTON);
        assert_eq!(c.mode_for(40, 30), CompositeMode::Stretch);
        let l = c.layout(0, 0, 40, 30);
        assert_eq!(l.len(), 9);
        let at = |r| placement_of(&l, r).unwrap();
        assert_eq!(at(SliceRegion::NorthWest), Rect::new(0, 0, 4, 4));
        assert_eq!(at(SliceRegion::NorthEast), Rect::new(36, 0, 4, 4));
        assert_eq!(at(SliceRegion::SouthWest), Rect::new(0, 26, 4, 4));
        assert_eq!(at(SliceRegion::SouthEast), Rect::new(36, 26, 4, 4));
        assert_eq!(at(SliceRegion::North), Rect::new(4, 0, 32, 4));
        assert_eq!(at(SliceRegion::South), Rect::new(4, 26, 32, 4));
        assert_eq!(at(SliceRegion::West), Rect::new(0, 4, 4, 22));
        assert_eq!(at(SliceRegion::East), Rect::new(36, 4, 4, 22));
        assert_eq!(at(SliceRegion::Center), Rect::new(4, 4, 32, 22));
    }

    #[test]
    fn stretch_respects_origin() {
        let c = control(BUTTON);
        let l = c.layout(100, 50, 40, 30);
        assert_eq!(
            placement_of(&l, SliceRegion::SouthEast),
            Some(Rect::new(136, 76, 4, 4))
        );
    }

    #[test]
    fn compress_into_10x8() {
        let c = control(BUTTON);
        assert_eq!(c.mode_for(10, 8), CompositeMode::Compress);
        let l = c.layout(0, 0, 10, 8);
        let at = |r| placement_of(&l, r).unwrap();
        assert_eq!(at(SliceRegion::NorthWest), Rect::new(0, 0, 2, 2));
        assert_eq!(at(SliceRegion::NorthEast), Rect::new(8, 0, 2, 2));
        assert_eq!(at(SliceRegion::SouthWest), Rect::new(0, 6, 2, 2));
        assert_eq!(at(SliceRegion::SouthEast), Rect::new(8, 6, 2, 2));
        assert_eq!(at(SliceRegion::Center), Rect::new(2, 2, 6, 4));
    }

    #[test]
    fn compress_only_scales_the_short_axis() {
        let c = control(BUTTON);
        let l = c.layout(0, 0, 40, 9);
        let at = |r| placement_of(&l, r).unwrap();
        assert_eq!(at(SliceRegion::NorthWest), Rect::new(0, 0, 4, 2));
        assert_eq!(at(SliceRegion::Center), Rect::new(4, 2, 32, 5));
        assert_eq!(at(SliceRegion::SouthEast), Rect::new(36, 7, 4, 2));
    }

    #[test]
    fn compress_tiny_destination_drops_center() {
        let c = control(NineSliceMetrics::new(10, 10, 5, 5, 5, 5));
        let l = c.layout(0, 0, 3, 3);
        let area: u32 = l.iter().map(|p| p.dst.w * p.dst.h).sum();
        assert_eq!(area, 9);
        for p in &l {
            assert!(Rect::new(0, 0, 3, 3).contains_rect(&p.dst));
        }
    }

    #[test]
    fn non_stretching_axis_is_centered() {
        let m = NineSliceMetrics::new(18, 22, 8, 8, 4, 6).with_stretch(true, false);
        let c = control(m);
        let l = c.layout(0, 0, 60, 40);
        // base = 40/2 - 22/2 = 9
        assert_eq!(
            placement_of(&l, SliceRegion::NorthWest),
            Some(Rect::new(0, 9, 8, 4))
        );
        assert_eq!(
            placement_of(&l, SliceRegion::Center),
            Some(Rect::new(8, 13, 44, 12))
        );
        assert_eq!(
            placement_of(&l, SliceRegion::SouthEast),
            Some(Rect::new(52, 25, 8, 6))
        );
    }

    #[test]
    fn hidden_middle_is_skipped() {
        let c = control(BUTTON.without_middle());
        assert!(c.slice(SliceRegion::Center).is_none());
        let l = c.layout(0, 0, 40, 30);
        assert_eq!(l.len(), 8);
        assert!(placement_of(&l, SliceRegion::Center).is_none());
    }

    #[test]
    fn zero_east_cut_omits_east_column() {
        let c = control(NineSliceMetrics::new(18, 18, 4, 0, 4, 4));
        assert_eq!(c.slice_count(), 6);
        let l = c.layout(0, 0, 40, 30);
        assert!(placement_of(&l, SliceRegion::East).is_none());
        assert_eq!(
            placement_of(&l, SliceRegion::Center),
            Some(Rect::new(4, 4, 36, 22))
        );
    }

    #[test]
    fn degenerate_destination_is_empty() {
        let c = control(BUTTON);
        assert!(c.layout(0, 0, 0, 30).is_empty());
        assert!(c.layout(0, 0, 40, -1).is_empty());
        let mut target = MockTarget::new();
        c.composite(&mut target, 0, 0, 0, 0).unwrap();
        assert!(target.calls.is_empty());
    }

    #[test]
    fn composite_draws_each_placement() {
        let c = control(BUTTON);
        let mut target = MockTarget::new();
        c.composite(&mut target, 5, 5, 40, 30).unwrap();
        let rects = target.drawn_rects();
        let expected: Vec<Rect> = c.layout(5, 5, 40, 30).iter().map(|p| p.dst).collect();
        assert_eq!(rects, expected);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let err = SlicedImageControl::new(&template(20, 18), BUTTON).unwrap_err();
        assert!(matches!(
            err,
            SkinError::MetricsMismatch {
                expected_width: 18,
                actual_width: 20,
                ..
            }
        ));
    }

    #[test]
    fn invalid_metrics_rejected() {
        let bad = NineSliceMetrics::new(8, 8, 5, 5, 1, 1);
        let err = SlicedImageControl::new(&template(8, 8), bad).unwrap_err();
        assert!(matches!(err, SkinError::InvalidMetrics(_)));
    }

    #[test]
    fn scaled_template_slices_at_device_size() {
        let c = SlicedImageControl::with_scale(&template(36, 36), BUTTON, 2).unwrap();
        let nw = c.slice(SliceRegion::NorthWest).unwrap();
        assert_eq!((nw.width(), nw.height()), (8, 8));
        // Placement stays logical.
        let l = c.layout(0, 0, 40, 30);
        assert_eq!(
            placement_of(&l, SliceRegion::NorthWest),
            Some(Rect::new(0, 0, 4, 4))
        );
        assert!(SlicedImageControl::with_scale(&template(18, 18), BUTTON, 2).is_err());
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(scale_round(4, 10, 18), 2);
        assert_eq!(scale_round(3, 9, 18), 2);
        assert_eq!(scale_round(5, 5, 10), 3);
        assert_eq!(scale_round(0, 5, 10), 0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn metrics_strategy() -> impl Strategy<Value = NineSliceMetrics> {
            (1u32..8, 1u32..8, 1u32..8, 1u32..8, 1u32..8, 1u32..8).prop_map(
                |(w, e, n, s, cw, ch)| NineSliceMetrics::new(w + e + cw, n + s + ch, w, e, n, s),
            )
        }

        proptest! {
            #[test]
            fn placements_tile_destination(
                m in metrics_strategy(),
                w in 1i32..80,
                h in 1i32..80,
                x in -20i32..20,
                y in -20i32..20,
            ) {
                let c = control(m);
                let l = c.layout(x, y, w, h);
                let dst = Rect::new(x, y, w as u32, h as u32);

                let area: u64 = l.iter().map(|p| p.dst.w as u64 * p.dst.h as u64).sum();
                prop_assert_eq!(area, w as u64 * h as u64);
                for (i, a) in l.iter().enumerate() {
                    prop_assert!(dst.contains_rect(&a.dst), "{:?} outside {:?}", a, dst);
                    for b in &l[i + 1..] {
                        prop_assert!(a.dst.intersect(&b.dst).is_none(), "{:?} overlaps {:?}", a, b);
                    }
                }
            }

            #[test]
            fn corners_keep_native_size_when_stretching(
                m in metrics_strategy(),
                extra_w in 0u32..40,
                extra_h in 0u32..40,
            ) {
                let c = control(m);
                let (w, h) = (m.min_width + extra_w, m.min_height + extra_h);
                let l = c.layout(0, 0, w as i32, h as i32);
                prop_assert_eq!(
                    placement_of(&l, SliceRegion::SouthEast),
                    Some(Rect::new((w - m.east) as i32, (h - m.south) as i32, m.east, m.south))
                );
            }
        }
    }
}
