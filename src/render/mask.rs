use crate::foundation::error::{StampError, StampResult};

/// 8-bit coverage raster of shaped glyphs.
///
/// `origin_x`/`origin_y` locate the pen origin (start of the baseline) inside the mask, so a
/// mask drawn "at" `(x, y)` puts its top-left corner at `(x - origin_x, y - origin_y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn new(
        width: u32,
        height: u32,
        origin_x: i32,
        origin_y: i32,
        coverage: Vec<u8>,
    ) -> StampResult<Self> {
        if coverage.len() != width as usize * height as usize {
            return Err(StampError::render(
                "glyph mask coverage length must equal width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            origin_x,
            origin_y,
            coverage,
        })
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            origin_x: 0,
            origin_y: 0,
            coverage: Vec::new(),
        }
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Tight box of non-zero coverage as `(left, top, right, bottom)` relative to the pen origin
    /// (right/bottom exclusive), or `None` when nothing is covered.
    pub fn ink_bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let (mut x0, mut y0) = (u32::MAX, u32::MAX);
        let (mut x1, mut y1) = (0u32, 0u32);
        let mut any = false;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.coverage_at(x, y) == 0 {
                    continue;
                }
                any = true;
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x + 1);
                y1 = y1.max(y + 1);
            }
        }
        if !any {
            return None;
        }
        let rel = |v: u32, origin: i32| i32::try_from(v).unwrap_or(i32::MAX) - origin;
        Some((
            rel(x0, self.origin_x),
            rel(y0, self.origin_y),
            rel(x1, self.origin_x),
            rel(y1, self.origin_y),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
