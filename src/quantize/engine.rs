//! Tile-by-tile quantization pass with staged residual hand-off
//!
//! Per tile the pass averages every group, quantizes the groups stage by stage
//! against the palette, writes the chosen token colors back into the image and
//! reports the choice. Tiles depend on error from the tile to their left and
//! the row above, so the scan is strictly sequential in raster order.

use ndarray::{Array3, ArrayView3, s};
use num_traits::Zero;
use tracing::{debug, trace};

use crate::color::lab::Lab;
use crate::io::configuration::{LAB_CHANNELS, MosaicConfig};
use crate::io::error::{MosaicError, Result, invalid_parameter, invalid_topology};
use crate::palette::search::Palette;
use crate::palette::token::ColorToken;
use crate::quantize::diffusion::{DiffusionState, FLOYD_STEINBERG};
use crate::quantize::tile::TileResult;
use crate::topology::stencil::Topology;

/// Shape of a completed pass and the carry buffers it left behind
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    /// Number of tile rows processed
    pub tile_rows: usize,
    /// Number of tile columns processed
    pub tile_cols: usize,
    /// Diffusion buffers after the final row swap
    pub diffusion: DiffusionState,
}

impl PassSummary {
    /// Total number of tiles reported
    pub const fn tile_count(&self) -> usize {
        self.tile_rows * self.tile_cols
    }
}

/// Average color of every group within the tile whose top-left pixel is
/// (`row`, `col`)
///
/// Pixels beyond the image edge are excluded. A group with no pixels inside
/// the image averages to the zero vector.
pub fn group_means(
    image: &ArrayView3<'_, f32>,
    topology: &Topology,
    row: usize,
    col: usize,
) -> Vec<Lab> {
    let (rows, cols, _) = image.dim();
    let side = topology.side();
    let row_end = (row + side).min(rows);
    let col_end = (col + side).min(cols);

    let mut sums = vec![[0.0f64; LAB_CHANNELS]; topology.group_count()];
    let mut counts = vec![0usize; topology.group_count()];

    if row < row_end && col < col_end {
        let tile = image.slice(s![row..row_end, col..col_end, ..]);
        for (dr, tile_row) in tile.outer_iter().enumerate() {
            for (dc, pixel) in tile_row.outer_iter().enumerate() {
                let Some(group) = topology.group_at(dr, dc) else {
                    continue;
                };
                if let (Some(sum), Some(count)) = (sums.get_mut(group), counts.get_mut(group)) {
                    for (acc, &value) in sum.iter_mut().zip(pixel.iter()) {
                        *acc += f64::from(value);
                    }
                    *count += 1;
                }
            }
        }
    }

    sums.iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                Lab::zero()
            } else {
                let n = count as f64;
                Lab::new(
                    (sum[0] / n) as f32,
                    (sum[1] / n) as f32,
                    (sum[2] / n) as f32,
                )
            }
        })
        .collect()
}

/// Quantization engine bound to one topology, palette and configuration
///
/// Construction performs every input check that does not depend on the image,
/// so a pass can only fail on the image shape or a broken palette invariant.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer<'a> {
    topology: &'a Topology,
    palette: &'a Palette,
    config: MosaicConfig,
}

impl<'a> Quantizer<'a> {
    /// Bind the engine to its read-only inputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The topology needs a part type the palette does not describe or cover
    pub fn new(topology: &'a Topology, palette: &'a Palette, config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        palette.validate_for(topology)?;
        Ok(Self {
            topology,
            palette,
            config,
        })
    }

    /// The topology tiles are partitioned with
    pub const fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// The palette tokens are drawn from
    pub const fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// The pass configuration
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Quantize one tile from its group means
    ///
    /// Stage one adds the error carried into `column` on the current row. Each
    /// stage's summed residual is split evenly over the next stage's groups;
    /// the last stage's summed residual is diffused with the Floyd-Steinberg
    /// weights into the first stage's slots of neighboring tiles.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::NoCandidate`] if a group's part type has no
    /// token, and an invalid topology error if `means` is shorter than the
    /// group count.
    pub fn quantize_tile(
        &self,
        means: &[Lab],
        column: usize,
        state: &mut DiffusionState,
    ) -> Result<Vec<&'a ColorToken>> {
        let stages = self.topology.stages();
        let mut chosen: Vec<Option<&'a ColorToken>> = vec![None; self.topology.group_count()];
        let mut handed_on = Lab::zero();
        let mut pooled = Lab::zero();

        for (index, stage) in stages.iter().enumerate() {
            let mut residual = Lab::zero();

            for &group in stage {
                let mean = means.get(group).copied().ok_or_else(|| {
                    invalid_topology(&format!("no mean supplied for group {group}"))
                })?;
                let part_type = self
                    .topology
                    .part_for(group)
                    .ok_or_else(|| invalid_topology(&format!("group {group} has no part type")))?;

                let mut target = mean + handed_on;
                if index == 0 {
                    target += state.current(column, group).unwrap_or_default();
                }

                let token =
                    self.palette
                        .nearest_available(target, part_type, self.config.luminance_weight)?;
                residual += target - token.lab();
                if let Some(slot) = chosen.get_mut(group) {
                    *slot = Some(token);
                }
            }

            match stages.get(index + 1) {
                Some(next) => handed_on = residual / next.len() as f32,
                None => pooled = residual,
            }
        }

        if let Some(first) = stages.first() {
            state.distribute(column, pooled, &FLOYD_STEINBERG, first);
        }

        chosen
            .into_iter()
            .enumerate()
            .map(|(group, token)| {
                token.ok_or_else(|| invalid_topology(&format!("group {group} was not quantized")))
            })
            .collect()
    }

    /// Run one full pass over `image`, replacing every pixel in place
    ///
    /// `image` is a `(rows, cols, 3)` Lab buffer. Each pixel ends up holding
    /// exactly the Lab color of the token chosen for its group, and
    /// `on_tile` receives one record per tile in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image does not have three channels (nothing is modified)
    /// - The configured tile count does not give this topology's tile side
    ///   for the image's long side (nothing is modified)
    /// - A palette invariant is violated mid-pass; the image is then partially
    ///   written and must be discarded
    pub fn run<F>(&self, image: &mut Array3<f32>, mut on_tile: F) -> Result<PassSummary>
    where
        F: FnMut(&TileResult<'a>),
    {
        let (rows, cols, channels) = image.dim();
        if channels != LAB_CHANNELS {
            return Err(MosaicError::ChannelMismatch {
                expected: LAB_CHANNELS,
                actual: channels,
            });
        }

        let side = self.topology.side();
        let configured = self.config.tile_side(rows.max(cols))?;
        if configured != side {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &self.config.tiles_per_long_side,
                &format!(
                    "gives {configured}-pixel tiles for a {rows}x{cols} image but the topology tile side is {side}"
                ),
            ));
        }

        let (tile_rows, tile_cols) = self.topology.tile_grid(rows, cols);
        let mut state = DiffusionState::new(tile_cols, self.topology.group_count());

        debug!(
            rows,
            cols, side, tile_rows, tile_cols, "starting quantization pass"
        );

        for tile_row in 0..tile_rows {
            let top = tile_row * side;
            for tile_col in 0..tile_cols {
                let left = tile_col * side;

                let means = group_means(&image.view(), self.topology, top, left);
                let tokens = self.quantize_tile(&means, tile_col, &mut state)?;
                self.write_back(image, top, left, &tokens);

                on_tile(&TileResult {
                    row: tile_row,
                    column: tile_col,
                    tokens,
                });
            }
            state.advance_row();
            trace!(tile_row, "tile row complete");
        }

        debug!(tiles = tile_rows * tile_cols, "quantization pass complete");

        Ok(PassSummary {
            tile_rows,
            tile_cols,
            diffusion: state,
        })
    }

    fn write_back(&self, image: &mut Array3<f32>, top: usize, left: usize, tokens: &[&ColorToken]) {
        let (rows, cols, _) = image.dim();
        let side = self.topology.side();
        let bottom = (top + side).min(rows);
        let right = (left + side).min(cols);
        if top >= bottom || left >= right {
            return;
        }

        let mut tile = image.slice_mut(s![top..bottom, left..right, ..]);
        for (dr, mut tile_row) in tile.outer_iter_mut().enumerate() {
            for (dc, mut pixel) in tile_row.outer_iter_mut().enumerate() {
                let Some(token) = self
                    .topology
                    .group_at(dr, dc)
                    .and_then(|group| tokens.get(group))
                else {
                    continue;
                };
                for (slot, value) in pixel.iter_mut().zip(token.lab().to_array()) {
                    *slot = value;
                }
            }
        }
    }
}
