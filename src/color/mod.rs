//! Perceptual color representation and conversion from device RGB

/// sRGB to Lab conversion for single colors and whole buffers
pub mod conversion;
/// Lab value type with the arithmetic used for error accumulation
pub mod lab;

pub use lab::Lab;
