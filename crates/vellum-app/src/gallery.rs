//! Gallery layout: every widget kind at a compact and a wide size, across
//! the interaction states a skin has to cover.

use vellum_core::color::Color;
use vellum_core::error::Result;
use vellum_core::state::{ControlState, Direction, Presentation, WidgetKind};
use vellum_core::{DrawTarget, Painter};

pub const BACKGROUND: Color = Color::rgb(232, 232, 236);

const CELL_W: i32 = 160;
const CELL_H: i32 = 40;
const MARGIN: i32 = 8;
const PAD: i32 = 5;
const COLUMNS: usize = 7;

/// Logical canvas size needed for one gallery.
pub fn canvas_size() -> (u32, u32) {
    let w = MARGIN * 2 + CELL_W * COLUMNS as i32;
    let h = MARGIN * 2 + CELL_H * WidgetKind::ALL.len() as i32 * 2;
    (w as u32, h as u32)
}

/// Compact and wide destination sizes for a kind. The compact size of
/// sliceable controls is below their template so it exercises compression.
fn sizes(kind: WidgetKind) -> [(i32, i32); 2] {
    match kind {
        WidgetKind::PushButton => [(12, 14), (140, 22)],
        WidgetKind::BevelButton => [(40, 24), (140, 30)],
        WidgetKind::CheckBox | WidgetKind::RadioButton => [(14, 14), (18, 18)],
        WidgetKind::ComboBox | WidgetKind::PopupButton => [(60, 20), (140, 22)],
        WidgetKind::ScrollBarTrack => [(60, 15), (140, 15)],
        WidgetKind::ScrollBarThumb => [(20, 15), (80, 15)],
        WidgetKind::SliderTrack => [(60, 6), (140, 6)],
        WidgetKind::SliderThumb => [(16, 18), (20, 22)],
        WidgetKind::ProgressBar => [(60, 14), (140, 16)],
        WidgetKind::MenuItem => [(60, 18), (140, 18)],
        WidgetKind::MenuBar => [(60, 22), (140, 22)],
        WidgetKind::TabButton => [(50, 22), (120, 24)],
        WidgetKind::TextField => [(60, 22), (140, 26)],
        WidgetKind::TreeDisclosure => [(12, 12), (16, 16)],
        WidgetKind::FrameTitleBar => [(60, 22), (140, 26)],
    }
}

/// The state painted in `column` for `kind`. `frame` drives the one
/// animated cell of the progress bar row.
fn state_for(kind: WidgetKind, column: usize, wide: bool, frame: u32) -> ControlState {
    let mut state = ControlState::new(kind);
    match kind {
        WidgetKind::ProgressBar
        | WidgetKind::SliderThumb
        | WidgetKind::ScrollBarThumb
        | WidgetKind::CheckBox
        | WidgetKind::RadioButton => state = state.with_value(0.6),
        WidgetKind::TreeDisclosure => {
            state = state.with_direction(if wide { Direction::Down } else { Direction::Right });
        }
        _ => {}
    }
    match column {
        0 => state,
        1 => state.with_focus(true),
        2 if kind == WidgetKind::ProgressBar => state.with_frame(frame),
        2 => state.with_default(true),
        3 => state.with_presentation(Presentation::Pressed),
        4 => state.with_presentation(Presentation::Rollover),
        5 => state.with_presentation(Presentation::Inactive),
        _ => state.with_presentation(Presentation::Disabled),
    }
}

/// Clear `target` and paint the whole gallery. Returns the number of
/// controls painted.
pub fn render(painter: &Painter, target: &mut dyn DrawTarget, frame: u32) -> Result<usize> {
    target.clear(BACKGROUND)?;
    let mut painted = 0;
    for (row, kind) in WidgetKind::ALL.into_iter().enumerate() {
        for (variant, (w, h)) in sizes(kind).into_iter().enumerate() {
            let y = MARGIN + CELL_H * (row as i32 * 2 + variant as i32) + PAD;
            for column in 0..COLUMNS {
                let x = MARGIN + CELL_W * column as i32 + PAD;
                let state = state_for(kind, column, variant == 1, frame);
                painter.paint(target, &state, x, y, w, h)?;
                painted += 1;
            }
        }
    }
    log::debug!("gallery frame {frame}: {painted} controls");
    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vellum_backend_soft::{ProceduralRasterizer, SoftCanvas};
    use vellum_core::{ImageCache, SkinConfig};

    fn builtin_painter() -> (Painter, Arc<ImageCache>) {
        let skin = SkinConfig::builtin().unwrap();
        let cache = Arc::new(ImageCache::from_config(&skin.cache));
        let painter = Painter::from_skin(
            &skin,
            Arc::clone(&cache),
            Arc::new(ProceduralRasterizer::default()),
        )
        .unwrap();
        (painter, cache)
    }

    #[test]
    fn every_kind_fits_its_cell() {
        for kind in WidgetKind::ALL {
            for (w, h) in sizes(kind) {
                assert!(w + PAD * 2 <= CELL_W, "{kind:?} too wide");
                assert!(h + PAD * 2 <= CELL_H, "{kind:?} too tall");
            }
        }
    }

    #[test]
    fn second_pass_is_served_from_cache() {
        let (painter, cache) = builtin_painter();
        let (w, h) = canvas_size();
        let mut canvas = SoftCanvas::new(w, h).unwrap();

        let first = render(&painter, &mut canvas, 0).unwrap();
        let misses = cache.stats().misses;
        let second = render(&painter, &mut canvas, 1).unwrap();

        assert_eq!(first, WidgetKind::ALL.len() * 2 * COLUMNS);
        assert_eq!(first, second);
        assert!(cache.stats().hits > 0);
        // At most the animated progress cells miss again.
        assert!(cache.stats().misses - misses <= 2);
    }

    #[test]
    fn gallery_paints_over_background() {
        let (painter, _) = builtin_painter();
        let (w, h) = canvas_size();
        let mut canvas = SoftCanvas::new(w, h).unwrap();
        render(&painter, &mut canvas, 0).unwrap();

        // The wide push button in the first column.
        let x0 = (MARGIN + PAD) as u32;
        let y0 = (MARGIN + CELL_H + PAD) as u32;
        let surface = canvas.surface();
        let touched = (y0..y0 + 22)
            .flat_map(|y| (x0..x0 + 140).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.color_at(x, y) != BACKGROUND)
            .count();
        assert!(touched > 140 * 22 / 2);
        assert_eq!(surface.color_at(0, 0), BACKGROUND);
    }
}
