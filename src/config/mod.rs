//! Stamp configuration: serde model, validation and a fluent builder.

/// Programmatic construction of [`model::StampConfig`].
pub mod builder;
/// Serializable stamping request.
pub mod model;
