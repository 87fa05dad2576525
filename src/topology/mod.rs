//! Tile stencils
//!
//! A stencil maps every cell of an L x L tile to a group. It is built from an
//! ordered list of paint operations and carries the part type and quantization
//! stage of each group.

/// Ordered region-paint operations
pub mod paint;
/// Topology tables and the circle stencil
pub mod stencil;

pub use paint::RegionPaint;
pub use stencil::{GroupId, Topology};
