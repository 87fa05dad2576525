//! Quantization engine

/// Diffusion kernels and carry buffers
pub mod diffusion;
/// Tile aggregation and the quantization pass
pub mod engine;
/// Per-tile output records
pub mod tile;

pub use diffusion::{DiffusionKernel, DiffusionState};
pub use engine::{PassSummary, Quantizer};
pub use tile::TileResult;
