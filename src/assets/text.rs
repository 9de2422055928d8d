use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    assets::source::{normalize_rel_path, read_rel_bytes},
    foundation::error::{StampError, StampResult},
    render::mask::GlyphMask,
};

/// What to shape: a single line of text in a font at a pixel size.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    pub text: &'a str,
    /// Relative font path; `None` selects the default font.
    pub font_source: Option<&'a str>,
    pub size_px: f32,
}

/// Tight ink box of shaped text, relative to the pen origin on the baseline.
///
/// `top` is negative for glyphs above the baseline; `right`/`bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(self) -> i32 {
        self.right - self.left
    }

    pub fn height(self) -> i32 {
        self.bottom - self.top
    }

    pub fn exact_center_x(self) -> f64 {
        f64::from(self.left + self.right) * 0.5
    }

    pub fn exact_center_y(self) -> f64 {
        f64::from(self.top + self.bottom) * 0.5
    }
}

/// Measured and rasterized text, ready to be painted.
#[derive(Clone, Debug)]
pub struct ShapedText {
    pub mask: GlyphMask,
    pub bounds: TextBounds,
    /// Pen advance of the whole line; may differ from `bounds.width()`.
    pub advance: f32,
    /// Font descent below the baseline, in pixels (positive).
    pub descent: f32,
}

/// Text measurement and glyph rasterization service.
pub trait TextShaper {
    fn shape(&mut self, request: &TextRequest<'_>) -> StampResult<ShapedText>;
}

/// Resolves font sources to font bytes, caching each source once.
///
/// `None` resolves to the system default sans-serif face (or the first system face).
/// Relative paths are read from `root`.
#[derive(Debug, Default)]
pub struct FontLibrary {
    root: Option<PathBuf>,
    cache: HashMap<Option<String>, Arc<Vec<u8>>>,
}

impl FontLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            cache: HashMap::new(),
        }
    }

    /// Library that only knows the system default font.
    pub fn system_only() -> Self {
        Self::default()
    }

    pub fn font_bytes(&mut self, source: Option<&str>) -> StampResult<Arc<Vec<u8>>> {
        let key = source.map(normalize_rel_path).transpose()?;
        if let Some(bytes) = self.cache.get(&key) {
            return Ok(bytes.clone());
        }

        let bytes = match &key {
            None => system_default_font()
                .ok_or_else(|| StampError::asset("no system font available for default text"))?,
            Some(path) => {
                let root = self.root.as_deref().ok_or_else(|| {
                    StampError::asset(format!("font '{path}' requested without a font root"))
                })?;
                read_rel_bytes(root, path)?
            }
        };
        let bytes = Arc::new(bytes);
        self.cache.insert(key, bytes.clone());
        Ok(bytes)
    }
}

/// Bytes of the platform's default sans-serif face, if any fonts are installed.
pub fn system_default_font() -> Option<Vec<u8>> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..usvg::fontdb::Query::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, _index| data.to_vec())
}

/// Stateful helper for building single-line Parley layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` as one unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
    ) -> StampResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StampError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StampError::asset("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StampError::asset("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// [`TextShaper`] backed by Parley layout and `vello_cpu` glyph rasterization.
#[derive(Default)]
pub struct ParleyShaper {
    fonts: FontLibrary,
    engine: TextLayoutEngine,
}

impl ParleyShaper {
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
        }
    }
}

impl TextShaper for ParleyShaper {
    #[tracing::instrument(skip(self), fields(len = request.text.len()))]
    fn shape(&mut self, request: &TextRequest<'_>) -> StampResult<ShapedText> {
        let font_bytes = self.fonts.font_bytes(request.font_source)?;
        let layout = self
            .engine
            .layout_line(request.text, font_bytes.as_slice(), request.size_px)?;
        rasterize_layout(&layout, &font_bytes, request.size_px)
    }
}

fn rasterize_layout(
    layout: &parley::Layout<()>,
    font_bytes: &Arc<Vec<u8>>,
    size_px: f32,
) -> StampResult<ShapedText> {
    let Some(line) = layout.lines().next() else {
        return Ok(ShapedText {
            mask: GlyphMask::empty(),
            bounds: TextBounds::default(),
            advance: 0.0,
            descent: 0.0,
        });
    };
    let m = line.metrics();
    let advance = m.advance;
    let descent = m.descent.abs();

    // Padding absorbs glyph ink that overhangs the line box (italics, accents).
    let pad = (size_px * 0.5).ceil() as u32 + 2;
    let line_w = advance.max(0.0).ceil() as u32;
    let line_h = (m.ascent + m.descent + m.leading).max(m.baseline).max(0.0).ceil() as u32;
    let to_u16 = |v: u32, what: &str| -> StampResult<u16> {
        v.try_into()
            .map_err(|_| StampError::render(format!("text raster {what} exceeds u16")))
    };
    let width = to_u16(line_w + 2 * pad, "width")?;
    let height = to_u16(line_h + 2 * pad, "height")?;

    // Snap the baseline onto a pixel row so the pen origin is integral.
    let baseline_row = m.baseline.ceil();
    let shift_y = f64::from(pad) + f64::from(baseline_row - m.baseline);

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((f64::from(pad), shift_y)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            // Line-relative positions: run offset, pen advance and baseline already applied.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    let coverage: Vec<u8> = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    let origin_y = i32::try_from(pad).unwrap_or(i32::MAX) + baseline_row as i32;
    let mask = GlyphMask::new(
        u32::from(width),
        u32::from(height),
        i32::try_from(pad).unwrap_or(i32::MAX),
        origin_y,
        coverage,
    )?;

    let bounds = mask
        .ink_bounds()
        .map(|(left, top, right, bottom)| TextBounds {
            left,
            top,
            right,
            bottom,
        })
        .unwrap_or_default();
    tracing::debug!(?bounds, advance, descent, "shaped text");

    Ok(ShapedText {
        mask,
        bounds,
        advance,
        descent,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
