//! Photo-to-mosaic quantization for catalogs of physical build parts
//!
//! An image in Lab space is cut into square tiles. Every tile is split into
//! groups by a [`Topology`] stencil, each group needs a specific part type,
//! and each group is matched to the perceptually nearest [`ColorToken`] that
//! is sold as that part type. Quantization error is handed from group to
//! group inside a tile and diffused to neighboring tiles so tone survives the
//! coarse palette.
//!
//! ```
//! use ndarray::Array3;
//! use partmosaic::{ColorToken, MosaicConfig, Palette, PartAvailability, Quantizer, Topology};
//!
//! let tokens = vec![
//!     ColorToken::new("0", "Black", [0, 0, 0], PartAvailability::all(4)),
//!     ColorToken::new("15", "White", [255, 255, 255], PartAvailability::all(4)),
//! ];
//! let palette = Palette::from_tokens(tokens)?;
//! let config = MosaicConfig::default().with_tiles_per_long_side(2);
//! let topology = Topology::circle_for(&config, 20, 20)?;
//!
//! let mut image = Array3::from_elem((20, 20, 3), 50.0f32);
//! let quantizer = Quantizer::new(&topology, &palette, config)?;
//! let mut tiles = Vec::new();
//! let summary = quantizer.run(&mut image, |tile| tiles.push(tile.clone()))?;
//!
//! assert_eq!(summary.tile_count(), 4);
//! assert_eq!(tiles.len(), 4);
//! # Ok::<(), partmosaic::MosaicError>(())
//! ```

#![deny(unsafe_code)]

/// Lab color values and sRGB conversion
pub mod color;
/// Configuration and error handling
pub mod io;
/// Color tokens, catalog ingestion and nearest-token search
pub mod palette;
/// Tile aggregation, staged quantization and error diffusion
pub mod quantize;
/// Tile stencils partitioning a tile into part groups
pub mod topology;

pub use color::Lab;
pub use io::configuration::MosaicConfig;
pub use io::error::{MosaicError, Result};
pub use palette::{ColorToken, Palette, PartAvailability, PartType};
pub use quantize::{DiffusionKernel, DiffusionState, PassSummary, Quantizer, TileResult};
pub use topology::{GroupId, RegionPaint, Topology};
