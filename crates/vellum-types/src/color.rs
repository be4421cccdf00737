//! RGBA colors and premultiplied-alpha conversion.

/// A color in straight (non-premultiplied) RGBA format, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Convert to premultiplied RGBA bytes.
    pub fn to_premultiplied(self) -> [u8; 4] {
        let a = self.a as u16;
        [
            mul_div_255(self.r as u16, a),
            mul_div_255(self.g as u16, a),
            mul_div_255(self.b as u16, a),
            self.a,
        ]
    }

    /// Recover a straight color from premultiplied RGBA bytes.
    pub fn from_premultiplied(px: [u8; 4]) -> Self {
        let a = px[3];
        if a == 0 {
            return Self::TRANSPARENT;
        }
        if a == 255 {
            return Self::rgb(px[0], px[1], px[2]);
        }
        let unmul = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
        Self::rgba(unmul(px[0]), unmul(px[1]), unmul(px[2]), a)
    }

    /// Lighten toward white by `amount` (0-255).
    pub fn lighten(self, amount: u8) -> Self {
        let up = |c: u8| c.saturating_add(mul_div_255(255 - c as u16, amount as u16));
        Self::rgba(up(self.r), up(self.g), up(self.b), self.a)
    }

    /// Darken toward black by `amount` (0-255).
    pub fn darken(self, amount: u8) -> Self {
        let down = |c: u8| c - mul_div_255(c as u16, amount as u16);
        Self::rgba(down(self.r), down(self.g), down(self.b), self.a)
    }

    /// Linearly interpolate between two colors with `t_num / t_den`.
    pub fn lerp(a: Color, b: Color, t_num: u32, t_den: u32) -> Color {
        Color::rgba(
            lerp_u8(a.r, b.r, t_num, t_den),
            lerp_u8(a.g, b.g, t_num, t_den),
            lerp_u8(a.b, b.b, t_num, t_den),
            lerp_u8(a.a, b.a, t_num, t_den),
        )
    }
}

/// `(a * b) / 255`, rounded.
pub fn mul_div_255(a: u16, b: u16) -> u8 {
    let t = a as u32 * b as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

/// Source-over blend of one premultiplied pixel onto another.
pub fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst[..4].copy_from_slice(&src),
        sa => {
            let inv = 255 - sa as u16;
            for i in 0..4 {
                dst[i] = src[i].saturating_add(mul_div_255(dst[i] as u16, inv));
            }
        }
    }
}

fn lerp_u8(a: u8, b: u8, t_num: u32, t_den: u32) -> u8 {
    if t_den == 0 {
        return a;
    }
    let t_num = t_num.min(t_den);
    ((a as u32 * (t_den - t_num) + b as u32 * t_num + t_den / 2) / t_den) as u8
}
