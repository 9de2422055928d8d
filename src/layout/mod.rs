//! Stamp placement.

/// Anchor names and the canvas-relative position resolver.
pub mod position;
