use crate::{
    foundation::core::{Point, Rgba8Premul},
    foundation::math::mul_div255_u8,
    render::composite::PremulRgba8,
};

/// Colour source used when filling glyph coverage.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8Premul),
    LinearGradient(LinearGradient),
}

/// Linear gradient with evenly spaced straight-alpha stops, clamped outside `[start, end]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops_rgba8: Vec<[u8; 4]>,
    /// Extra alpha applied on top of every stop.
    pub alpha: u8,
}

impl Paint {
    /// Solid paint from a straight-alpha colour, with `opacity` multiplied into its alpha.
    pub fn solid(color_rgba8: [u8; 4], opacity: Option<u8>) -> Self {
        let [r, g, b, a] = color_rgba8;
        let a = scale_alpha(a, opacity);
        Paint::Solid(Rgba8Premul::from_straight_rgba(r, g, b, a))
    }

    /// Premultiplied colour of this paint at `p` (drawing-space pixel centre).
    pub fn color_at(&self, p: Point) -> PremulRgba8 {
        match self {
            Paint::Solid(c) => c.to_array(),
            Paint::LinearGradient(g) => g.color_at(p).to_array(),
        }
    }
}

impl LinearGradient {
    pub fn color_at(&self, p: Point) -> Rgba8Premul {
        let Some(first) = self.stops_rgba8.first().copied() else {
            return Rgba8Premul::transparent();
        };
        let n = self.stops_rgba8.len();
        if n == 1 {
            return self.finish(first);
        }

        let d = self.end - self.start;
        let len2 = d.hypot2();
        let t = if len2 <= f64::EPSILON {
            0.0
        } else {
            ((p - self.start).dot(d) / len2).clamp(0.0, 1.0)
        };

        let pos = t * (n - 1) as f64;
        let i = (pos.floor() as usize).min(n - 2);
        let frac = pos - i as f64;
        let (a, b) = (self.stops_rgba8[i], self.stops_rgba8[i + 1]);
        let mut mixed = [0u8; 4];
        for c in 0..4 {
            let v = f64::from(a[c]) + (f64::from(b[c]) - f64::from(a[c])) * frac;
            mixed[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        self.finish(mixed)
    }

    fn finish(&self, straight: [u8; 4]) -> Rgba8Premul {
        let [r, g, b, a] = straight;
        Rgba8Premul::from_straight_rgba(r, g, b, mul_div255_u8(u16::from(a), u16::from(self.alpha)))
    }
}

pub(crate) fn scale_alpha(a: u8, opacity: Option<u8>) -> u8 {
    match opacity {
        Some(o) => mul_div255_u8(u16::from(a), u16::from(o)),
        None => a,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
