//! Error types for catalog ingestion, input validation and quantization passes

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all mosaic operations
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Failed to open or read the color catalog
    #[error("Failed to read catalog '{}': {source}", .path.display())]
    CatalogRead {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A catalog data row does not follow the catalog grammar
    ///
    /// Ingestion stops at the first malformed row.
    #[error("Malformed catalog row at line {line}: {reason}")]
    CatalogRow {
        /// One-based line number of the offending row
        line: u64,
        /// What is wrong with the row
        reason: String,
    },

    /// Catalog contained a header but no tokens
    #[error("Catalog contains no color tokens")]
    EmptyCatalog,

    /// Tokens handed to a palette disagree on the number of part types
    #[error("Token {index} ('{id}') has {actual} part types, expected {expected}")]
    TokenPartCount {
        /// Zero-based position of the token in the supplied list
        index: usize,
        /// Identifier of the offending token
        id: String,
        /// Part-type count of the first token
        expected: usize,
        /// Part-type count of the offending token
        actual: usize,
    },

    /// Configuration or input parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Image buffer does not carry three color channels
    #[error("Image has {actual} channels, expected {expected}")]
    ChannelMismatch {
        /// Required channel count
        expected: usize,
        /// Channel count of the supplied buffer
        actual: usize,
    },

    /// Topology references part types the palette does not describe
    #[error("Topology needs part type {topology} but palette only has {palette} part types")]
    PartTypeMismatch {
        /// Highest part type index required by the topology
        topology: usize,
        /// Number of part types known to the palette
        palette: usize,
    },

    /// No token in the palette offers a part type the topology needs
    #[error("No token in the palette is available as part type {part_type}")]
    UncoveredPartType {
        /// Part type without any available token
        part_type: usize,
    },

    /// Nearest-token search found no candidate; the pass is aborted
    #[error("Palette invariant violated: no candidate token for part type {part_type}")]
    NoCandidate {
        /// Part type that was searched for
        part_type: usize,
    },

    /// Topology tables are inconsistent with each other
    #[error("Invalid topology: {reason}")]
    InvalidTopology {
        /// Description of the inconsistency
        reason: String,
    },

    /// Diffusion kernel entry points outside the two-row buffer window
    #[error("Kernel entry ({dx}, {dy}) reaches outside the diffusion window")]
    KernelOutOfReach {
        /// Horizontal offset of the entry
        dx: i32,
        /// Vertical offset of the entry
        dy: i32,
    },

    /// Diffusion kernel weights do not add up to one
    #[error("Kernel weights sum to {total} but divisor is {divisor}")]
    KernelWeights {
        /// Sum of all entry weights
        total: u32,
        /// Normalizing divisor
        divisor: u32,
    },
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<csv::Error> for MosaicError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        Self::CatalogRow {
            line,
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a catalog row error
pub fn catalog_row(line: u64, reason: &impl ToString) -> MosaicError {
    MosaicError::CatalogRow {
        line,
        reason: reason.to_string(),
    }
}

/// Create an invalid topology error
pub fn invalid_topology(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidTopology {
        reason: reason.to_string(),
    }
}
