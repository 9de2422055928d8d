//! Image and font resources.

pub(crate) mod decode;
/// Image sources resolving identifiers to decoded rasters.
pub mod source;
/// Text shaping and glyph rasterization.
pub mod text;
