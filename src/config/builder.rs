use std::sync::Arc;

use crate::{
    config::model::{
        BaseImage, ImageStamp, StampConfig, StampPayload, TextShader, TextShadow, TextStamp,
    },
    foundation::core::PixelOffset,
    foundation::error::{StampError, StampResult},
    layout::position::Anchor,
};

/// Fluent construction of a [`StampConfig`], validated on [`StampConfigBuilder::build`].
pub struct StampConfigBuilder {
    base: BaseImage,
    text: Option<TextStamp>,
    image: Option<ImageStamp>,
    anchor: Anchor,
    position: PixelOffset,
    margin: PixelOffset,
    rotation_deg: f32,
    alpha: i32,
}

impl StampConfigBuilder {
    pub fn new(base: BaseImage) -> Self {
        Self {
            base,
            text: None,
            image: None,
            anchor: Anchor::default(),
            position: PixelOffset::default(),
            margin: PixelOffset::default(),
            rotation_deg: 0.0,
            alpha: 255,
        }
    }

    pub fn with_base_raster(image: image::DynamicImage) -> Self {
        Self::new(BaseImage::Raster(Arc::new(image)))
    }

    pub fn with_base_resource(id: impl Into<String>) -> Self {
        Self::new(BaseImage::Resource(id.into()))
    }

    pub fn text(mut self, text: TextStamp) -> Self {
        self.text = Some(text);
        self
    }

    pub fn image(mut self, image: ImageStamp) -> Self {
        self.image = Some(image);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Explicit position; only honoured with [`Anchor::Custom`].
    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = PixelOffset::new(x, y);
        self
    }

    pub fn margin(mut self, x: i32, y: i32) -> Self {
        self.margin = PixelOffset::new(x, y);
        self
    }

    pub fn rotation_deg(mut self, deg: f32) -> Self {
        self.rotation_deg = deg;
        self
    }

    pub fn alpha(mut self, alpha: i32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn build(self) -> StampResult<StampConfig> {
        let stamp = match (self.text, self.image) {
            (Some(_), Some(_)) => {
                return Err(StampError::validation(
                    "a stamp is either text or image, not both",
                ));
            }
            (Some(t), None) => Some(StampPayload::Text(t)),
            (None, Some(i)) => Some(StampPayload::Image(i)),
            (None, None) => None,
        };

        let cfg = StampConfig {
            base: self.base,
            stamp,
            anchor: self.anchor,
            position: self.position,
            margin: self.margin,
            rotation_deg: self.rotation_deg,
            alpha: self.alpha,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Text stamp with default font, size and colour.
pub fn text_stamp(text: impl Into<String>) -> TextStamp {
    TextStamp {
        text: text.into(),
        font_source: None,
        size_px: 40.0,
        color_rgba8: [0, 0, 0, 255],
        shader: None,
        shadow: None,
        background_rgba8: None,
    }
}

impl TextStamp {
    pub fn font_source(mut self, src: impl Into<String>) -> Self {
        self.font_source = Some(src.into());
        self
    }

    pub fn size_px(mut self, size_px: f32) -> Self {
        self.size_px = size_px;
        self
    }

    pub fn color_rgba8(mut self, color: [u8; 4]) -> Self {
        self.color_rgba8 = color;
        self
    }

    pub fn linear_gradient(
        mut self,
        start: [f32; 2],
        end: [f32; 2],
        colors_rgba8: Vec<[u8; 4]>,
    ) -> Self {
        self.shader = Some(TextShader::LinearGradient {
            start,
            end,
            colors_rgba8,
        });
        self
    }

    pub fn shadow(mut self, dx: f32, dy: f32, blur_radius: f32, color_rgba8: [u8; 4]) -> Self {
        self.shadow = Some(TextShadow {
            dx,
            dy,
            blur_radius,
            color_rgba8,
        });
        self
    }

    pub fn background_rgba8(mut self, color: [u8; 4]) -> Self {
        self.background_rgba8 = Some(color);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/builder.rs"]
mod tests;
