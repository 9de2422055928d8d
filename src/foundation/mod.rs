/// Geometry, pixel offsets and colour primitives.
pub mod core;
/// Error type shared by every stage.
pub mod error;
pub(crate) mod math;
