/// Stamp compositing onto a base image.
pub mod compositor;
