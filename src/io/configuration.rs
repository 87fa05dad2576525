//! Mosaic constants and per-pass configuration

use serde::{Deserialize, Serialize};

use crate::io::error::{Result, invalid_parameter};

// Part-type columns of the reference brick catalog, in marker column order
/// Flat 1x1 plate
pub const PLATE_1X1: usize = 0;
/// Flat 1x1 tile (part type "A" of the circle stencil)
pub const TILE_1X1: usize = 1;
/// Narrow round 1x1 plate (part type "B" of the circle stencil)
pub const ROUND_1X1: usize = 2;
/// Wide round 2x2 plate (part type "C" of the circle stencil)
pub const ROUND_2X2: usize = 3;
/// Number of part-type marker columns in the reference catalog
pub const REFERENCE_PART_TYPE_COUNT: usize = 4;

/// Channels per pixel of a perceptual image buffer
pub const LAB_CHANNELS: usize = 3;

/// Default number of tiles along the image's long side
pub const DEFAULT_TILES_PER_LONG_SIDE: usize = 96;

/// Default scale applied to the lightness term of the token distance
pub const DEFAULT_LUMINANCE_WEIGHT: f32 = 1.0;

/// Large disk radius is the tile side divided by this
pub const LARGE_DISK_DIVISOR: usize = 2;
/// Small disk radius is the tile side divided by this
pub const SMALL_DISK_DIVISOR: usize = 5;

/// Knobs for one quantization pass
///
/// Every pass is a function of (image, topology, palette, config); nothing is
/// read from global state, so interactive callers rebuild this value and rerun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Multiplier on the squared lightness difference during token search
    pub luminance_weight: f32,
    /// Number of tiles placed along the image's long side
    pub tiles_per_long_side: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            luminance_weight: DEFAULT_LUMINANCE_WEIGHT,
            tiles_per_long_side: DEFAULT_TILES_PER_LONG_SIDE,
        }
    }
}

impl MosaicConfig {
    /// Set the lightness weight
    #[must_use]
    pub const fn with_luminance_weight(mut self, weight: f32) -> Self {
        self.luminance_weight = weight;
        self
    }

    /// Set the tile count along the long side
    #[must_use]
    pub const fn with_tiles_per_long_side(mut self, tiles: usize) -> Self {
        self.tiles_per_long_side = tiles;
        self
    }

    /// Check that every knob is usable
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The luminance weight is negative, NaN or infinite
    /// - The tile count along the long side is zero
    pub fn validate(&self) -> Result<()> {
        if !self.luminance_weight.is_finite() || self.luminance_weight < 0.0 {
            return Err(invalid_parameter(
                "luminance_weight",
                &self.luminance_weight,
                &"must be a finite, non-negative number",
            ));
        }

        if self.tiles_per_long_side == 0 {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &self.tiles_per_long_side,
                &"at least one tile is required",
            ));
        }

        Ok(())
    }

    /// Tile side length in pixels for an image whose long side is `long_side`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the requested tile
    /// count exceeds the long side (which would give an empty tile)
    pub fn tile_side(&self, long_side: usize) -> Result<usize> {
        self.validate()?;
        let side = long_side / self.tiles_per_long_side;
        if side == 0 {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &self.tiles_per_long_side,
                &format!("exceeds the image long side of {long_side} pixels"),
            ));
        }
        Ok(side)
    }
}
