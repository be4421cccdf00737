//! Procedural control rasterizer.
//!
//! Draws bevelled, gel-style chrome for every widget kind with the shape
//! primitives in [`crate::shapes`]. Sizes are derived from the destination
//! rectangle, so the same code renders 1x and HiDPI buffers.

use vellum_core::color::Color;
use vellum_core::error::{Result, SkinError};
use vellum_core::geometry::Rect;
use vellum_core::pixmap::Pixmap;
use vellum_core::state::{ControlState, Direction, Orientation, Presentation, WidgetKind};
use vellum_core::NativeRasterizer;

use crate::shapes::{
    GradientAxis, draw_line, fill_circle, fill_rounded_gradient, fill_rounded_rect, fill_triangle,
    hline, stroke_rounded_rect,
};

/// Colors used by the procedural rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub face_top: Color,
    pub face_bottom: Color,
    pub border: Color,
    pub track: Color,
    pub field: Color,
    pub glyph: Color,
    pub focus: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::rgb(62, 130, 230),
            face_top: Color::rgb(252, 252, 252),
            face_bottom: Color::rgb(222, 222, 226),
            border: Color::rgb(140, 140, 148),
            track: Color::rgb(232, 232, 236),
            field: Color::WHITE,
            glyph: Color::rgb(40, 40, 44),
            focus: Color::rgb(90, 150, 240).with_alpha(170),
        }
    }
}

/// Reference [`NativeRasterizer`] that paints controls procedurally.
#[derive(Debug, Clone, Default)]
pub struct ProceduralRasterizer {
    palette: Palette,
}

impl ProceduralRasterizer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Face gradient stops for a presentation.
    fn face(&self, state: &ControlState) -> (Color, Color) {
        let p = &self.palette;
        let (top, bottom) = if state.is_default && state.presentation != Presentation::Disabled {
            (p.accent.lighten(90), p.accent)
        } else {
            (p.face_top, p.face_bottom)
        };
        match state.presentation {
            Presentation::Active => (top, bottom),
            Presentation::Pressed => (top.darken(40), bottom.darken(50)),
            Presentation::Rollover => (top, bottom.lighten(40)),
            Presentation::Inactive => (p.face_top, p.face_top.darken(12)),
            Presentation::Disabled => (top.with_alpha(140), bottom.with_alpha(140)),
        }
    }

    fn border(&self, state: &ControlState) -> Color {
        match state.presentation {
            Presentation::Disabled | Presentation::Inactive => self.palette.border.lighten(80),
            Presentation::Pressed => self.palette.border.darken(40),
            _ => self.palette.border,
        }
    }

    fn accent(&self, state: &ControlState) -> Color {
        match state.presentation {
            Presentation::Inactive | Presentation::Disabled => Color::rgb(170, 170, 176),
            Presentation::Pressed => self.palette.accent.darken(40),
            _ => self.palette.accent,
        }
    }

    fn gradient_axis(state: &ControlState) -> GradientAxis {
        match state.orientation {
            Orientation::Horizontal => GradientAxis::Vertical,
            Orientation::Vertical => GradientAxis::Horizontal,
        }
    }

    fn bevel(&self, p: &mut Pixmap, state: &ControlState, d: Rect, radius: u32) {
        let (top, bottom) = self.face(state);
        fill_rounded_gradient(p, d, radius, top, bottom, Self::gradient_axis(state));
        stroke_rounded_rect(p, d, radius, self.border(state));
    }

    fn draw_button(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let radius = match state.kind {
            WidgetKind::BevelButton => (d.h / 6).max(1),
            WidgetKind::TabButton => (d.h / 5).max(1),
            _ => d.h / 2,
        };
        self.bevel(p, state, d, radius);
        // Specular highlight across the upper half.
        let gloss = Rect::new(d.x + 2, d.y + 1, d.w.saturating_sub(4), d.h / 2);
        fill_rounded_rect(p, gloss, radius, Color::WHITE.with_alpha(60));
    }

    fn draw_arrow_well(&self, p: &mut Pixmap, state: &ControlState, d: Rect, double: bool) {
        let well_w = (d.h * 3 / 4).min(d.w);
        let well = Rect::new(d.right() - well_w as i32, d.y, well_w, d.h);
        let accent = self.accent(state);
        fill_rounded_gradient(
            p,
            well,
            d.h / 2,
            accent.lighten(70),
            accent,
            GradientAxis::Vertical,
        );
        let cx = well.x + well.w as i32 / 2;
        let cy = well.y + well.h as i32 / 2;
        let s = (well.h as i32 / 6).max(1);
        let white = Color::WHITE;
        if double {
            fill_triangle(p, [(cx - s, cy - 1), (cx + s, cy - 1), (cx, cy - s - 1)], white);
            fill_triangle(p, [(cx - s, cy + 1), (cx + s, cy + 1), (cx, cy + s + 1)], white);
        } else {
            fill_triangle(p, [(cx - s, cy - s / 2), (cx + s, cy - s / 2), (cx, cy + s)], white);
        }
    }

    fn draw_check_box(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let side = d.w.min(d.h);
        let bx = Rect::new(d.x, d.y + (d.h - side) as i32 / 2, side, side);
        let on = state.value() >= 0.5;
        if on {
            let accent = self.accent(state);
            fill_rounded_gradient(
                p,
                bx,
                side / 5,
                accent.lighten(60),
                accent,
                GradientAxis::Vertical,
            );
            stroke_rounded_rect(p, bx, side / 5, accent.darken(60));
            let s = side as i32;
            let w = (s / 7).max(1);
            let (x0, y0) = (bx.x, bx.y);
            let knee = (x0 + s * 2 / 5, y0 + s * 7 / 10);
            draw_line(p, (x0 + s / 4, y0 + s / 2), knee, w, Color::WHITE);
            draw_line(p, knee, (x0 + s * 3 / 4, y0 + s / 4), w, Color::WHITE);
        } else {
            self.bevel(p, state, bx, side / 5);
        }
    }

    fn draw_radio_button(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let side = d.w.min(d.h) as i32;
        let r = side / 2;
        let (cx, cy) = (d.x + d.w as i32 / 2, d.y + d.h as i32 / 2);
        let on = state.value() >= 0.5;
        let fill = if on {
            self.accent(state)
        } else {
            self.face(state).1
        };
        fill_circle(p, cx, cy, r, self.border(state));
        fill_circle(p, cx, cy, (r - 1).max(0), fill);
        if on {
            fill_circle(p, cx, cy, (r / 3).max(1), Color::WHITE);
        }
    }

    fn draw_track(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let radius = d.w.min(d.h) / 2;
        let track = self.palette.track;
        let (a, b) = (track.darken(25), track);
        fill_rounded_gradient(p, d, radius, a, b, Self::gradient_axis(state));
        stroke_rounded_rect(p, d, radius, track.darken(45));
    }

    fn draw_thumb(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let inset = Rect::new(d.x + 1, d.y + 1, d.w.saturating_sub(2), d.h.saturating_sub(2));
        let radius = inset.w.min(inset.h) / 2;
        let accent = self.accent(state);
        fill_rounded_gradient(
            p,
            inset,
            radius,
            accent.lighten(80),
            accent,
            Self::gradient_axis(state),
        );
        stroke_rounded_rect(p, inset, radius, accent.darken(50));
    }

    fn draw_slider_track(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let (bar, filled) = match state.orientation {
            Orientation::Horizontal => {
                let t = (d.h / 2).clamp(1, 6);
                let bar = Rect::new(d.x, d.y + (d.h - t) as i32 / 2, d.w, t);
                let fw = (bar.w as f32 * state.value()) as u32;
                (bar, Rect::new(bar.x, bar.y, fw, bar.h))
            }
            Orientation::Vertical => {
                let t = (d.w / 2).clamp(1, 6);
                let bar = Rect::new(d.x + (d.w - t) as i32 / 2, d.y, t, d.h);
                let fh = (bar.h as f32 * state.value()) as u32;
                (bar, Rect::new(bar.x, bar.bottom() - fh as i32, bar.w, fh))
            }
        };
        self.draw_track(p, state, bar);
        let radius = bar.w.min(bar.h) / 2;
        fill_rounded_rect(p, filled, radius, self.accent(state));
    }

    fn draw_slider_thumb(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let r = d.w.min(d.h) as i32 / 2;
        let (cx, cy) = (d.x + d.w as i32 / 2, d.y + d.h as i32 / 2);
        let (top, bottom) = self.face(state);
        fill_circle(p, cx, cy, r, self.border(state));
        fill_circle(p, cx, cy, (r - 1).max(0), bottom);
        fill_circle(p, cx, cy - r / 4, (r / 2).max(1), top);
    }

    fn draw_progress_bar(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        self.draw_track(p, state, d);
        let radius = d.h / 2;
        let accent = self.accent(state);
        let fw = (d.w as f32 * state.value()).round() as u32;
        let bar = Rect::new(d.x, d.y, fw, d.h);
        fill_rounded_gradient(
            p,
            bar,
            radius,
            accent.lighten(90),
            accent,
            GradientAxis::Vertical,
        );
        if let Some(frame) = state.frame {
            // Diagonal barber-pole stripes advancing one step per frame.
            let period = (d.h as i32).max(4);
            let offset = (frame as i32 * 2) % period;
            let stripe = Color::WHITE.with_alpha(70);
            for y in 0..bar.h as i32 {
                for x in 0..bar.w as i32 {
                    if (x + y + offset).rem_euclid(period) < period / 2 {
                        p.blend_pixel(bar.x + x, bar.y + y, stripe);
                    }
                }
            }
        }
    }

    fn draw_menu_item(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        match state.presentation {
            Presentation::Rollover | Presentation::Pressed => {
                let accent = self.accent(state);
                fill_rounded_gradient(
                    p,
                    d,
                    0,
                    accent.lighten(30),
                    accent,
                    GradientAxis::Vertical,
                );
            }
            _ => fill_rounded_rect(p, d, 0, self.palette.field.with_alpha(240)),
        }
    }

    fn draw_menu_bar(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let (top, bottom) = self.face(state);
        fill_rounded_gradient(p, d, 0, top, bottom, GradientAxis::Vertical);
        hline(p, d.x, d.right() - 1, d.bottom() - 1, self.border(state));
    }

    fn draw_text_field(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let fill = match state.presentation {
            Presentation::Disabled => self.palette.field.darken(15),
            _ => self.palette.field,
        };
        fill_rounded_rect(p, d, 0, fill);
        stroke_rounded_rect(p, d, 0, self.border(state));
        // Inner shadow along the top edge.
        if d.h > 2 {
            hline(p, d.x + 1, d.right() - 2, d.y + 1, Color::BLACK.with_alpha(40));
        }
    }

    fn draw_disclosure(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let s = (d.w.min(d.h) as i32 * 2 / 5).max(1);
        let (cx, cy) = (d.x + d.w as i32 / 2, d.y + d.h as i32 / 2);
        let pts = match state.direction {
            Direction::Down => [(cx - s, cy - s / 2), (cx + s, cy - s / 2), (cx, cy + s)],
            Direction::Up => [(cx - s, cy + s / 2), (cx + s, cy + s / 2), (cx, cy - s)],
            Direction::Left => [(cx + s / 2, cy - s), (cx + s / 2, cy + s), (cx - s, cy)],
            Direction::Right | Direction::None => {
                [(cx - s / 2, cy - s), (cx - s / 2, cy + s), (cx + s, cy)]
            }
        };
        let color = match state.presentation {
            Presentation::Disabled | Presentation::Inactive => self.palette.border,
            _ => self.palette.glyph,
        };
        fill_triangle(p, pts, color);
    }

    fn draw_title_bar(&self, p: &mut Pixmap, state: &ControlState, d: Rect) {
        let (top, bottom) = match state.presentation {
            Presentation::Inactive | Presentation::Disabled => {
                (self.palette.face_top, self.palette.face_top)
            }
            _ => (self.palette.face_top.darken(10), self.palette.face_bottom.darken(20)),
        };
        fill_rounded_gradient(p, d, 0, top, bottom, GradientAxis::Vertical);
        hline(p, d.x, d.right() - 1, d.bottom() - 1, self.border(state));

        let r = (d.h as i32 / 4).max(1);
        let lights = [
            Color::rgb(252, 96, 92),
            Color::rgb(253, 188, 64),
            Color::rgb(52, 200, 74),
        ];
        let cy = d.y + d.h as i32 / 2;
        for (i, c) in lights.iter().enumerate() {
            let cx = d.x + r * 2 + i as i32 * r * 3;
            let c = match state.presentation {
                Presentation::Inactive | Presentation::Disabled => Color::rgb(200, 200, 204),
                _ => *c,
            };
            fill_circle(p, cx, cy, r, c);
        }
    }
}

impl NativeRasterizer for ProceduralRasterizer {
    fn rasterize(&self, state: &ControlState, buffer: &mut Pixmap, dest: Rect) -> Result<()> {
        if dest.is_empty() || !buffer.bounds().contains_rect(&dest) {
            return Err(SkinError::Rasterize(format!(
                "{:?} destination {}x{} at ({}, {}) does not fit {}x{} buffer",
                state.kind,
                dest.w,
                dest.h,
                dest.x,
                dest.y,
                buffer.width(),
                buffer.height()
            )));
        }
        log::trace!(
            "drawing {:?} ({:?}) at {}x{}",
            state.kind,
            state.presentation,
            dest.w,
            dest.h
        );

        if state.focused {
            let ring = dest.outset(2);
            let radius = match state.kind {
                WidgetKind::PushButton | WidgetKind::ComboBox | WidgetKind::PopupButton => {
                    ring.h / 2
                }
                _ => 3,
            };
            fill_rounded_rect(buffer, ring, radius, self.palette.focus);
        }

        match state.kind {
            WidgetKind::PushButton | WidgetKind::BevelButton | WidgetKind::TabButton => {
                self.draw_button(buffer, state, dest)
            }
            WidgetKind::PopupButton => {
                self.draw_button(buffer, state, dest);
                self.draw_arrow_well(buffer, state, dest, true);
            }
            WidgetKind::ComboBox => {
                self.draw_text_field(buffer, state, dest);
                self.draw_arrow_well(buffer, state, dest, false);
            }
            WidgetKind::CheckBox => self.draw_check_box(buffer, state, dest),
            WidgetKind::RadioButton => self.draw_radio_button(buffer, state, dest),
            WidgetKind::ScrollBarTrack => self.draw_track(buffer, state, dest),
            WidgetKind::ScrollBarThumb => self.draw_thumb(buffer, state, dest),
            WidgetKind::SliderTrack => self.draw_slider_track(buffer, state, dest),
            WidgetKind::SliderThumb => self.draw_slider_thumb(buffer, state, dest),
            WidgetKind::ProgressBar => self.draw_progress_bar(buffer, state, dest),
            WidgetKind::MenuItem => self.draw_menu_item(buffer, state, dest),
            WidgetKind::MenuBar => self.draw_menu_bar(buffer, state, dest),
            WidgetKind::TextField => self.draw_text_field(buffer, state, dest),
            WidgetKind::TreeDisclosure => self.draw_disclosure(buffer, state, dest),
            WidgetKind::FrameTitleBar => self.draw_title_bar(buffer, state, dest),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &ControlState, w: u32, h: u32) -> Pixmap {
        let mut p = Pixmap::new(w, h).unwrap();
        ProceduralRasterizer::default()
            .rasterize(state, &mut p, Rect::new(0, 0, w, h))
            .unwrap();
        p
    }

    fn opaque_pixels(p: &Pixmap) -> usize {
        p.data().chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn every_widget_kind_draws_something() {
        for kind in WidgetKind::ALL {
            let p = render(&ControlState::new(kind), 40, 22);
            assert!(opaque_pixels(&p) > 0, "{kind:?} drew nothing");
        }
    }

    #[test]
    fn every_widget_kind_survives_tiny_buffers() {
        for kind in WidgetKind::ALL {
            for (w, h) in [(1, 1), (2, 7), (7, 2)] {
                let state = ControlState::new(kind).with_focus(true).with_value(1.0);
                render(&state, w, h);
            }
        }
    }

    #[test]
    fn destination_outside_buffer_fails() {
        let mut p = Pixmap::new(10, 10).unwrap();
        let state = ControlState::new(WidgetKind::PushButton);
        let r = ProceduralRasterizer::default();
        assert!(matches!(
            r.rasterize(&state, &mut p, Rect::new(5, 5, 10, 10)),
            Err(SkinError::Rasterize(_))
        ));
        assert!(r.rasterize(&state, &mut p, Rect::new(0, 0, 0, 10)).is_err());
    }

    #[test]
    fn focus_ring_draws_into_margin() {
        let state = ControlState::new(WidgetKind::TextField).with_focus(true);
        let mut p = Pixmap::new(46, 26).unwrap();
        ProceduralRasterizer::default()
            .rasterize(&state, &mut p, Rect::new(3, 3, 40, 20))
            .unwrap();
        // Margin row between the ring and the field.
        assert!(p.pixel(20, 1)[3] > 0);
        // Outermost row stays clear.
        assert_eq!(p.pixel(20, 0)[3], 0);

        let unfocused = ControlState::new(WidgetKind::TextField);
        let mut q = Pixmap::new(46, 26).unwrap();
        ProceduralRasterizer::default()
            .rasterize(&unfocused, &mut q, Rect::new(3, 3, 40, 20))
            .unwrap();
        assert_eq!(q.pixel(20, 1)[3], 0);
    }

    #[test]
    fn pressed_differs_from_active() {
        let active = render(&ControlState::new(WidgetKind::PushButton), 60, 22);
        let pressed = render(
            &ControlState::new(WidgetKind::PushButton).with_presentation(Presentation::Pressed),
            60,
            22,
        );
        assert_ne!(active.data(), pressed.data());
    }

    #[test]
    fn check_box_value_changes_rendering() {
        let off = render(&ControlState::new(WidgetKind::CheckBox), 14, 14);
        let on = render(&ControlState::new(WidgetKind::CheckBox).with_value(1.0), 14, 14);
        assert_ne!(off.data(), on.data());
    }

    #[test]
    fn progress_fill_tracks_value() {
        let state = ControlState::new(WidgetKind::ProgressBar).with_value(0.5);
        let p = render(&state, 100, 14);
        let accent = Palette::default().accent;
        let left = p.color_at(25, 12);
        let right = p.color_at(75, 12);
        assert!(left.b > left.r, "filled half should be accent-colored: {left:?}");
        assert!(right.b.abs_diff(right.r) < 20, "unfilled half should be gray: {right:?}");
        assert!(accent.b > accent.r);
    }

    #[test]
    fn animation_frames_differ() {
        let base = ControlState::new(WidgetKind::ProgressBar).with_value(1.0);
        let a = render(&base.clone().with_frame(0), 60, 14);
        let b = render(&base.with_frame(3), 60, 14);
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn disclosure_direction_changes_shape() {
        let right = render(
            &ControlState::new(WidgetKind::TreeDisclosure).with_direction(Direction::Right),
            12,
            12,
        );
        let down = render(
            &ControlState::new(WidgetKind::TreeDisclosure).with_direction(Direction::Down),
            12,
            12,
        );
        assert_ne!(right.data(), down.data());
    }
}
