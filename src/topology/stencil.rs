//! Tile stencil: group raster, group-to-part table and quantization order

use ndarray::Array2;
use tracing::debug;

use crate::io::configuration::{MosaicConfig, ROUND_1X1, ROUND_2X2, TILE_1X1};
use crate::io::error::{Result, invalid_parameter, invalid_topology};
use crate::palette::token::PartType;
use crate::topology::paint::{circle_plan, paint_raster};

/// Index of a sub-region within a tile
pub type GroupId = usize;

/// Part type required by each circle-stencil group
///
/// Corner remnants take flat 1x1 tiles, the large disk a wide round 2x2 and
/// the small disk a narrow round 1x1. This is catalog configuration, not a
/// property of the shapes.
pub const CIRCLE_GROUP_PARTS: [PartType; 6] =
    [TILE_1X1, TILE_1X1, TILE_1X1, TILE_1X1, ROUND_2X2, ROUND_1X1];

/// Order in which the circle-stencil groups are quantized
pub const CIRCLE_STAGES: [&[GroupId]; 3] = [&[4], &[5], &[0, 1, 2, 3]];

/// Reusable partition of an L x L tile into groups
///
/// Besides the raster, a topology fixes which part type each group needs and
/// the stages in which groups are quantized: the first stage absorbs error
/// carried from neighboring tiles, each stage hands its residual to the next,
/// and the last stage's pooled residual is diffused to neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    raster: Array2<GroupId>,
    group_parts: Vec<PartType>,
    stages: Vec<Vec<GroupId>>,
    group_sizes: Vec<usize>,
}

impl Topology {
    /// Create a topology from explicit tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The raster is empty or not square
    /// - The raster names a group without an entry in `group_parts`
    /// - A group owns no cell of the raster
    /// - `stages` is empty, has an empty stage, or does not list every group exactly once
    pub fn new(
        raster: Array2<GroupId>,
        group_parts: Vec<PartType>,
        stages: Vec<Vec<GroupId>>,
    ) -> Result<Self> {
        let (rows, cols) = raster.dim();
        if rows == 0 || rows != cols {
            return Err(invalid_topology(&format!(
                "raster must be a non-empty square, got {rows}x{cols}"
            )));
        }

        let group_count = group_parts.len();
        let mut group_sizes = vec![0; group_count];
        for &group in &raster {
            match group_sizes.get_mut(group) {
                Some(size) => *size += 1,
                None => {
                    return Err(invalid_topology(&format!(
                        "raster uses group {group} but only {group_count} groups have a part type"
                    )));
                }
            }
        }

        if let Some(empty) = group_sizes.iter().position(|&size| size == 0) {
            return Err(invalid_topology(&format!(
                "group {empty} owns no cell of the {rows}x{cols} raster"
            )));
        }

        if stages.is_empty() || stages.iter().any(Vec::is_empty) {
            return Err(invalid_topology(&"every stage must hold at least one group"));
        }

        let mut seen = vec![false; group_count];
        for &group in stages.iter().flatten() {
            let Some(flag) = seen.get_mut(group) else {
                return Err(invalid_topology(&format!(
                    "stage names unknown group {group}"
                )));
            };
            if *flag {
                return Err(invalid_topology(&format!(
                    "group {group} appears in more than one stage"
                )));
            }
            *flag = true;
        }
        if let Some(missing) = seen.iter().position(|flag| !flag) {
            return Err(invalid_topology(&format!(
                "group {missing} is never quantized"
            )));
        }

        Ok(Self {
            raster,
            group_parts,
            stages,
            group_sizes,
        })
    }

    /// Build the six-group circle stencil
    ///
    /// Tile side is `image_long_side / tiles_per_long_side`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile count is zero or exceeds the long side, or
    /// if the resulting tile side is too small for every group to own a cell
    /// (sides 1, 2, 4 and 6)
    pub fn circle(tiles_per_long_side: usize, image_long_side: usize) -> Result<Self> {
        if tiles_per_long_side == 0 {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &tiles_per_long_side,
                &"at least one tile is required",
            ));
        }
        let side = image_long_side / tiles_per_long_side;
        if side == 0 {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &tiles_per_long_side,
                &format!("exceeds the image long side of {image_long_side} pixels"),
            ));
        }

        let raster = paint_raster(side, &circle_plan(side));
        if let Some(empty) =
            (0..CIRCLE_GROUP_PARTS.len()).find(|group| !raster.iter().any(|cell| cell == group))
        {
            return Err(invalid_parameter(
                "tiles_per_long_side",
                &tiles_per_long_side,
                &format!("tile side {side} leaves circle group {empty} without cells"),
            ));
        }

        let topology = Self::new(
            raster,
            CIRCLE_GROUP_PARTS.to_vec(),
            CIRCLE_STAGES.iter().map(|stage| stage.to_vec()).collect(),
        )?;

        debug!(
            side,
            group_sizes = ?topology.group_sizes,
            "circle stencil built"
        );
        Ok(topology)
    }

    /// Build the circle stencil for an image of `rows` x `cols` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or yields empty tiles
    pub fn circle_for(config: &MosaicConfig, rows: usize, cols: usize) -> Result<Self> {
        let long_side = rows.max(cols);
        config.tile_side(long_side)?;
        Self::circle(config.tiles_per_long_side, long_side)
    }

    /// Tile side length in pixels
    pub fn side(&self) -> usize {
        self.raster.nrows()
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.group_parts.len()
    }

    /// Group of the cell at (`row`, `col`) within a tile
    pub fn group_at(&self, row: usize, col: usize) -> Option<GroupId> {
        self.raster.get((row, col)).copied()
    }

    /// The lookup raster
    pub const fn raster(&self) -> &Array2<GroupId> {
        &self.raster
    }

    /// Part type required by each group
    pub fn group_parts(&self) -> &[PartType] {
        &self.group_parts
    }

    /// Part type required by `group`
    pub fn part_for(&self, group: GroupId) -> Option<PartType> {
        self.group_parts.get(group).copied()
    }

    /// Quantization stages in order
    pub fn stages(&self) -> &[Vec<GroupId>] {
        &self.stages
    }

    /// Cell count of each group in an unclipped tile
    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    /// Tile rows and columns needed to cover `rows` x `cols` pixels
    ///
    /// Partial tiles at the right and bottom edges are counted.
    pub fn tile_grid(&self, rows: usize, cols: usize) -> (usize, usize) {
        let side = self.side();
        (rows.div_ceil(side), cols.div_ceil(side))
    }
}
