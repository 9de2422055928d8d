//! Stamper overlays a text or image "stamp" onto a base raster.
//!
//! Placement comes from a named [`Anchor`] (or explicit coordinates), and stamps support
//! rotation, transparency, drop shadows, background fills and full-canvas tiling.
//!
//! - Describe the request with a [`StampConfig`] (JSON or [`StampConfigBuilder`])
//! - Create a [`Stamper`] with an [`ImageSource`] and a [`TextShaper`]
//! - Call [`Stamper::add_stamp`] to get a new image; the base is never modified
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod stamp;

pub use crate::assets::source::{FsImageSource, ImageSource, MemoryImageSource};
pub use crate::assets::text::{
    FontLibrary, ParleyShaper, ShapedText, TextBounds, TextRequest, TextShaper,
};
pub use crate::config::builder::{StampConfigBuilder, text_stamp};
pub use crate::config::model::{
    BaseImage, ImageStamp, StampConfig, StampPayload, TextShader, TextShadow, TextStamp,
};
pub use crate::foundation::core::{Dimensions, PixelOffset, Rgba8Premul};
pub use crate::foundation::error::{StampError, StampResult};
pub use crate::layout::position::{Anchor, resolve};
pub use crate::stamp::compositor::Stamper;
