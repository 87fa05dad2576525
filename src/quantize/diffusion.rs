//! Error diffusion kernels and the two-row carry buffers
//!
//! Residual color error of a tile is pushed to tiles that have not been
//! quantized yet: the tile to the right on the current tile row, and three
//! tiles on the row below. Only those two rows are ever live, so the state is
//! a pair of row buffers that swap when a tile row completes.

use ndarray::Array2;
use num_traits::Zero;

use crate::color::lab::Lab;
use crate::io::error::{MosaicError, Result};
use crate::topology::stencil::GroupId;

/// An error diffusion kernel over neighboring tiles
///
/// Each entry is `(dx, dy, weight)`; the neighbor receives
/// `error * weight / divisor`. Entries may only reach one tile sideways and
/// at most one row down, which is the window the carry buffers hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffusionKernel {
    /// (dx, dy, weight) entries in tile units
    pub entries: &'static [(i32, i32, u32)],
    /// Normalizing divisor
    pub divisor: u32,
}

/// Floyd-Steinberg kernel, the fixed split of a tile's pooled residual
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // below-left
        (0, 1, 5),  // below
        (1, 1, 1),  // below-right
    ],
    divisor: 16,
};

impl DiffusionKernel {
    /// Sum of entry weights
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|&(_, _, weight)| weight).sum()
    }

    /// Fraction of error sent to one entry
    pub fn fraction(&self, weight: u32) -> f32 {
        weight as f32 / self.divisor as f32
    }

    /// Check that the kernel conserves error and stays inside the buffers
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An entry points at an already quantized tile or beyond one tile of reach
    /// - The weights do not sum to the divisor
    pub fn validate(&self) -> Result<()> {
        for &(dx, dy, _) in self.entries {
            let reachable = match dy {
                0 => dx == 1,
                1 => (-1..=1).contains(&dx),
                _ => false,
            };
            if !reachable {
                return Err(MosaicError::KernelOutOfReach { dx, dy });
            }
        }

        let total = self.total_weight();
        if self.divisor == 0 || total != self.divisor {
            return Err(MosaicError::KernelWeights {
                total,
                divisor: self.divisor,
            });
        }
        Ok(())
    }
}

/// Per-group error carried into tiles on the current and next tile row
///
/// Buffers are `tile columns + 2` wide so the rightward carry out of the last
/// column lands in a padding slot instead of needing a bounds check. The
/// state belongs to a single pass and starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionState {
    current: Array2<Lab>,
    next: Array2<Lab>,
}

impl DiffusionState {
    /// Create zeroed buffers for `tile_cols` tile columns and `group_count` groups
    pub fn new(tile_cols: usize, group_count: usize) -> Self {
        let shape = (tile_cols + 2, group_count);
        Self {
            current: Array2::from_elem(shape, Lab::zero()),
            next: Array2::from_elem(shape, Lab::zero()),
        }
    }

    /// Number of column slots per row buffer, padding included
    pub fn width(&self) -> usize {
        self.current.nrows()
    }

    /// Number of group slots per column
    pub fn group_count(&self) -> usize {
        self.current.ncols()
    }

    /// Error waiting for `group` of the tile at `column` on the current row
    pub fn current(&self, column: usize, group: GroupId) -> Option<Lab> {
        self.current.get((column, group)).copied()
    }

    /// Error waiting for `group` of the tile at `column` on the next row
    pub fn next(&self, column: usize, group: GroupId) -> Option<Lab> {
        self.next.get((column, group)).copied()
    }

    /// Spread `residual` from the tile at `column` through `kernel`
    ///
    /// Each neighbor's share is split evenly across the `targets` group slots.
    /// The below-left share is dropped at the leftmost column.
    pub fn distribute(
        &mut self,
        column: usize,
        residual: Lab,
        kernel: &DiffusionKernel,
        targets: &[GroupId],
    ) {
        if targets.is_empty() {
            return;
        }
        let per_target = residual / targets.len() as f32;

        for &(dx, dy, weight) in kernel.entries {
            let Some(target_column) = column.checked_add_signed(dx as isize) else {
                continue;
            };
            let share = per_target * kernel.fraction(weight);
            let row = if dy == 0 {
                &mut self.current
            } else {
                &mut self.next
            };
            for &group in targets {
                if let Some(slot) = row.get_mut((target_column, group)) {
                    *slot += share;
                }
            }
        }
    }

    /// Finish a tile row: the next row becomes current and a fresh row opens
    pub fn advance_row(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.fill(Lab::zero());
    }

    /// Zero both buffers
    pub fn reset(&mut self) {
        self.current.fill(Lab::zero());
        self.next.fill(Lab::zero());
    }

    /// Whether no error is pending anywhere
    pub fn is_zero(&self) -> bool {
        self.current.iter().chain(self.next.iter()).all(Zero::is_zero)
    }
}
