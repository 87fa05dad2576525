//! Region-paint operations that build a tile's group raster
//!
//! A stencil is produced by applying an ordered list of paint operations to a
//! zeroed square raster. Later operations overwrite earlier ones where they
//! overlap, so the list order is the precedence order.

use ndarray::Array2;

use crate::io::configuration::{LARGE_DISK_DIVISOR, SMALL_DISK_DIVISOR};
use crate::topology::stencil::GroupId;

/// One shape painted with a group id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPaint {
    /// Axis-aligned rectangle covering rows `top..bottom` and columns `left..right`
    Rect {
        /// First row (inclusive)
        top: usize,
        /// First column (inclusive)
        left: usize,
        /// Last row (exclusive)
        bottom: usize,
        /// Last column (exclusive)
        right: usize,
        /// Group written into covered cells
        group: GroupId,
    },
    /// Filled disk of cells whose distance to the center is at most `radius`
    Disk {
        /// Center row
        center_row: usize,
        /// Center column
        center_col: usize,
        /// Radius in cells
        radius: usize,
        /// Group written into covered cells
        group: GroupId,
    },
}

impl RegionPaint {
    /// Group id this operation writes
    pub const fn group(&self) -> GroupId {
        match *self {
            Self::Rect { group, .. } | Self::Disk { group, .. } => group,
        }
    }

    /// Whether the cell at (`row`, `col`) is covered by this shape
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        match *self {
            Self::Rect {
                top,
                left,
                bottom,
                right,
                ..
            } => row >= top && row < bottom && col >= left && col < right,
            Self::Disk {
                center_row,
                center_col,
                radius,
                ..
            } => {
                let dr = row.abs_diff(center_row);
                let dc = col.abs_diff(center_col);
                dr * dr + dc * dc <= radius * radius
            }
        }
    }

    /// Paint this shape onto `raster`, overwriting covered cells
    pub fn apply(&self, raster: &mut Array2<GroupId>) {
        let group = self.group();
        for ((row, col), cell) in raster.indexed_iter_mut() {
            if self.covers(row, col) {
                *cell = group;
            }
        }
    }
}

/// Apply `operations` in order to a `side` x `side` raster of group 0
pub fn paint_raster(side: usize, operations: &[RegionPaint]) -> Array2<GroupId> {
    let mut raster = Array2::zeros((side, side));
    for operation in operations {
        operation.apply(&mut raster);
    }
    raster
}

/// Paint plan of the circle stencil for a tile of `side` cells
///
/// Quadrants 0-3 (top-left, top-right, bottom-left, bottom-right), then the
/// large disk (group 4), then the small disk (group 5) on top.
pub fn circle_plan(side: usize) -> Vec<RegionPaint> {
    let half = side / 2;
    vec![
        RegionPaint::Rect {
            top: 0,
            left: 0,
            bottom: half,
            right: half,
            group: 0,
        },
        RegionPaint::Rect {
            top: 0,
            left: half,
            bottom: half,
            right: side,
            group: 1,
        },
        RegionPaint::Rect {
            top: half,
            left: 0,
            bottom: side,
            right: half,
            group: 2,
        },
        RegionPaint::Rect {
            top: half,
            left: half,
            bottom: side,
            right: side,
            group: 3,
        },
        RegionPaint::Disk {
            center_row: half,
            center_col: half,
            radius: side / LARGE_DISK_DIVISOR,
            group: 4,
        },
        RegionPaint::Disk {
            center_row: half,
            center_col: half,
            radius: side / SMALL_DISK_DIVISOR,
            group: 5,
        },
    ]
}
