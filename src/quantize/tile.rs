//! Per-tile output records

use crate::palette::token::ColorToken;
use crate::topology::stencil::GroupId;

/// Tokens chosen for one tile
///
/// Records are produced in row-major tile order, once per tile, during a
/// single pass. Part counters and model exporters are built on top of this.
#[derive(Debug, Clone, PartialEq)]
pub struct TileResult<'p> {
    /// Tile row index
    pub row: usize,
    /// Tile column index
    pub column: usize,
    /// Chosen token for each group, indexed by group id
    pub tokens: Vec<&'p ColorToken>,
}

impl<'p> TileResult<'p> {
    /// Token chosen for `group`
    pub fn token(&self, group: GroupId) -> Option<&'p ColorToken> {
        self.tokens.get(group).copied()
    }
}
