//! Nine-slice painter: one template rasterization per control state,
//! composited into any destination size.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::SingleImagePainter;
use super::rasterize;
use crate::backend::{ContextId, DrawTarget};
use crate::error::{Result, SkinError};
use crate::geometry::Rect;
use crate::key::StateKey;
use crate::metrics::{NineSliceMetrics, SliceMetricsProvider};
use crate::pixmap::Pixmap;
use crate::slice::SlicedImageControl;
use crate::state::ControlState;

type ControlMap = HashMap<StateKey, Arc<SlicedImageControl>>;

pub struct NineSlicingPainter {
    fallback: SingleImagePainter,
    provider: Box<dyn SliceMetricsProvider + Send + Sync>,
    controls: Mutex<ControlMap>,
}

impl NineSlicingPainter {
    /// `fallback` paints states the provider has no metrics for; its
    /// rasterizer also renders the templates.
    pub fn new(
        fallback: SingleImagePainter,
        provider: impl SliceMetricsProvider + Send + Sync + 'static,
    ) -> Self {
        Self {
            fallback,
            provider: Box::new(provider),
            controls: Mutex::new(HashMap::new()),
        }
    }

    pub fn fallback(&self) -> &SingleImagePainter {
        &self.fallback
    }

    fn controls(&self) -> MutexGuard<'_, ControlMap> {
        self.controls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Paint `state` into `(x, y, w, h)`.
    pub fn paint(
        &self,
        target: &mut dyn DrawTarget,
        state: &ControlState,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<()> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let Some(metrics) = self.provider.metrics_for(state) else {
            return self.fallback.paint(target, state, x, y, w, h);
        };
        let scale = target.scale_factor().max(1);
        let device = match metrics.validate().and_then(|()| metrics.scaled(scale)) {
            Ok(device) => device,
            Err(e) => {
                log::error!("slice metrics for {:?} rejected: {e}", state.kind);
                return Err(e);
            }
        };
        let key = template_key(target.context_id(), &metrics, &device, state);
        let cached = self.controls().get(&key).map(Arc::clone);
        let control = match cached {
            Some(control) => control,
            None => {
                let (tw, th) = (device.min_width, device.min_height);
                log::debug!("rasterizing {:?} template at {tw}x{th}", state.kind);
                let Some(template) = rasterize(
                    self.fallback.rasterizer().as_ref(),
                    state,
                    tw,
                    th,
                    Rect::new(0, 0, tw, th),
                ) else {
                    return Ok(());
                };
                let control = Arc::new(build_control(&template, metrics, scale, state)?);
                if !state.is_animating() {
                    self.controls().insert(key, Arc::clone(&control));
                }
                control
            }
        };
        control.composite(target, x, y, w, h)
    }

    /// Install a pre-rendered template for `state` on a context, bypassing
    /// the rasterizer. The template must match the state's metrics at
    /// `scale` exactly.
    pub fn preload(
        &self,
        context: ContextId,
        scale: u32,
        state: &ControlState,
        template: &Pixmap,
    ) -> Result<()> {
        let Some(metrics) = self.provider.metrics_for(state) else {
            return Err(SkinError::Config(format!(
                "no slice metrics registered for {:?}",
                state.kind
            )));
        };
        let scale = scale.max(1);
        let control = build_control(template, metrics, scale, state)?;
        if !state.is_animating() {
            let key = template_key(context, &metrics, &metrics.scaled(scale)?, state);
            self.controls().insert(key, Arc::new(control));
        }
        Ok(())
    }

    /// Drop every sliced control.
    pub fn clear(&self) {
        self.controls().clear();
    }

    /// Number of sliced controls held.
    pub fn len(&self) -> usize {
        self.controls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls().is_empty()
    }
}

/// Key of a template: device pixel size from `device`, logical bounds from
/// `logical`.
fn template_key(
    context: ContextId,
    logical: &NineSliceMetrics,
    device: &NineSliceMetrics,
    state: &ControlState,
) -> StateKey {
    StateKey::new(
        context,
        device.min_width,
        device.min_height,
        Rect::new(0, 0, logical.min_width, logical.min_height),
        state.clone(),
    )
}

fn build_control(
    template: &Pixmap,
    metrics: NineSliceMetrics,
    scale: u32,
    state: &ControlState,
) -> Result<SlicedImageControl> {
    SlicedImageControl::with_scale(template, metrics, scale)
        .inspect_err(|e| log::error!("cannot slice {:?} template: {e}", state.kind))
}
