//! CPU raster primitives used by the compositor.
//!
//! Everything here works on premultiplied RGBA8.

pub(crate) mod blur;
pub(crate) mod composite;
/// Glyph coverage masks.
pub mod mask;
/// Solid and gradient paints.
pub mod paint;
/// Owned raster surfaces and repeating patterns.
pub mod surface;
