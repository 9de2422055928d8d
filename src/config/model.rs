use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::core::PixelOffset,
    foundation::error::{StampError, StampResult},
    layout::position::Anchor,
};

/// A complete stamping request.
///
/// The configuration is a read-only data carrier: it can be built programmatically (see
/// [`crate::StampConfigBuilder`]) or loaded from JSON, and is never mutated by the
/// compositor.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StampConfig {
    /// Image the stamp is composited onto.
    pub base: BaseImage,
    /// Text or image payload; `None` makes stamping a no-op copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<StampPayload>,
    /// Symbolic placement.
    #[serde(default)]
    pub anchor: Anchor,
    /// Explicit coordinates, used only with [`Anchor::Custom`].
    #[serde(default)]
    pub position: PixelOffset,
    /// Offset added to the resolved or explicit position.
    #[serde(default)]
    pub margin: PixelOffset,
    /// Clockwise rotation in degrees around the stamp's pivot.
    #[serde(default)]
    pub rotation_deg: f32,
    /// Stamp opacity; values outside `[0, 255]` leave the stamp's own alpha untouched.
    #[serde(default = "default_alpha")]
    pub alpha: i32,
}

fn default_alpha() -> i32 {
    255
}

/// Where the base image comes from.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum BaseImage {
    /// Already-decoded raster.
    #[serde(skip)]
    Raster(Arc<image::DynamicImage>),
    /// Identifier resolved through an [`crate::ImageSource`].
    Resource(String),
}

/// The overlay itself: exactly one of text or image.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum StampPayload {
    /// Rendered text.
    Text(TextStamp),
    /// Secondary raster.
    Image(ImageStamp),
}

/// Text stamp configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextStamp {
    /// UTF-8 text content; an empty string is treated as no payload.
    pub text: String,
    /// Relative path to a font file; `None` uses the default font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_source: Option<String>,
    /// Font size in pixels.
    #[serde(default = "default_text_size_px")]
    pub size_px: f32,
    /// Text color as straight-alpha RGBA8.
    #[serde(default = "default_text_color_rgba8")]
    pub color_rgba8: [u8; 4],
    /// Optional shader replacing the solid color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader: Option<TextShader>,
    /// Optional drop shadow (non-tile placements only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<TextShadow>,
    /// Optional background rectangle color (non-tile placements only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_rgba8: Option<[u8; 4]>,
}

fn default_text_size_px() -> f32 {
    40.0
}

fn default_text_color_rgba8() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl TextStamp {
    /// Background color, treating fully transparent black as "unset".
    pub fn effective_background(&self) -> Option<[u8; 4]> {
        self.background_rgba8.filter(|c| *c != [0, 0, 0, 0])
    }
}

/// Shader applied to glyphs instead of the solid text color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TextShader {
    /// Linear gradient between `start` and `end` (drawing-space pixels) with evenly spaced
    /// straight-alpha stops.
    LinearGradient {
        start: [f32; 2],
        end: [f32; 2],
        colors_rgba8: Vec<[u8; 4]>,
    },
}

/// Drop shadow drawn beneath the glyphs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadow {
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default)]
    pub blur_radius: f32,
    #[serde(default = "default_shadow_color_rgba8")]
    pub color_rgba8: [u8; 4],
}

fn default_shadow_color_rgba8() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl TextShadow {
    /// A shadow with no offset and no blur draws nothing.
    pub fn is_visible(&self) -> bool {
        self.dx != 0.0 || self.dy != 0.0 || self.blur_radius != 0.0
    }
}

/// Image stamp source.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum ImageStamp {
    /// Already-decoded raster.
    #[serde(skip)]
    Raster(Arc<image::DynamicImage>),
    /// Identifier resolved through an [`crate::ImageSource`].
    Resource(String),
}

impl StampConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> StampResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| StampError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read stamp config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> StampResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StampError::serde(e.to_string()))
    }

    /// Alpha as an opacity byte when it lies in `[0, 255]`.
    pub fn opacity(&self) -> Option<u8> {
        u8::try_from(self.alpha).ok()
    }

    /// The payload that will actually be drawn, if any.
    pub fn effective_stamp(&self) -> Option<&StampPayload> {
        match &self.stamp {
            Some(StampPayload::Text(t)) if t.text.is_empty() => None,
            other => other.as_ref(),
        }
    }

    /// Check every caller-facing contract; nothing is drawn when this fails.
    pub fn validate(&self) -> StampResult<()> {
        if let BaseImage::Resource(id) = &self.base
            && id.trim().is_empty()
        {
            return Err(StampError::validation("base image resource must be non-empty"));
        }
        if !self.rotation_deg.is_finite() {
            return Err(StampError::validation("rotation_deg must be finite"));
        }

        match &self.stamp {
            None => Ok(()),
            Some(StampPayload::Image(ImageStamp::Resource(id))) if id.trim().is_empty() => Err(
                StampError::validation("image stamp resource must be non-empty"),
            ),
            Some(StampPayload::Image(_)) => Ok(()),
            Some(StampPayload::Text(t)) => t.validate(),
        }
    }
}

impl TextStamp {
    fn validate(&self) -> StampResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(StampError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        if let Some(src) = &self.font_source
            && src.trim().is_empty()
        {
            return Err(StampError::validation("font_source must be non-empty"));
        }
        if let Some(shadow) = &self.shadow {
            let finite = [shadow.dx, shadow.dy, shadow.blur_radius]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(StampError::validation("shadow parameters must be finite"));
            }
            if shadow.blur_radius < 0.0 {
                return Err(StampError::validation("shadow blur_radius must be >= 0"));
            }
        }
        if let Some(TextShader::LinearGradient {
            start,
            end,
            colors_rgba8,
        }) = &self.shader
        {
            if colors_rgba8.len() < 2 {
                return Err(StampError::validation(
                    "linear gradient needs at least two colors",
                ));
            }
            if !start.iter().chain(end.iter()).all(|v| v.is_finite()) {
                return Err(StampError::validation(
                    "linear gradient endpoints must be finite",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
