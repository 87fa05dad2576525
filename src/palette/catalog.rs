//! Color catalog ingestion
//!
//! A catalog is a comma-separated table with one header row. Each data row is
//!
//! ```text
//! id,name,"r,g,b",hex,marker,marker,...
//! ```
//!
//! where the quoted triple holds 0-255 device RGB components, the hex column
//! is ignored, and every remaining column is one part type that is available
//! when the cell holds a literal `+`. Ingestion stops with an error naming the
//! first malformed row instead of silently truncating the catalog.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::io::error::{MosaicError, Result, catalog_row};
use crate::palette::search::Palette;
use crate::palette::token::{ColorToken, PartAvailability};

const ID_COLUMN: usize = 0;
const NAME_COLUMN: usize = 1;
const RGB_COLUMN: usize = 2;
const FIRST_MARKER_COLUMN: usize = 4;

/// Marker cell content meaning "available as this part type"
pub const AVAILABLE_MARKER: &str = "+";

/// Parse a quoted `r,g,b` cell into device RGB
///
/// # Errors
///
/// Returns a description of the problem when the cell does not hold exactly
/// three integers in `0..=255`
pub fn parse_rgb(cell: &str) -> std::result::Result<[u8; 3], String> {
    let components = cell
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid RGB component '{}': {e}", part.trim()))
        })
        .collect::<std::result::Result<Vec<u8>, String>>()?;

    match components.as_slice() {
        &[r, g, b] => Ok([r, g, b]),
        other => Err(format!(
            "expected 3 RGB components, found {} in '{cell}'",
            other.len()
        )),
    }
}

fn parse_row(record: &StringRecord, line: u64, marker_count: usize) -> Result<ColorToken> {
    if record.len() != FIRST_MARKER_COLUMN + marker_count {
        return Err(catalog_row(
            line,
            &format!(
                "expected {} columns, found {}",
                FIRST_MARKER_COLUMN + marker_count,
                record.len()
            ),
        ));
    }

    let id = record.get(ID_COLUMN).unwrap_or_default().trim();
    if id.is_empty() {
        return Err(catalog_row(line, &"missing token id"));
    }
    let name = record.get(NAME_COLUMN).unwrap_or_default().trim();

    let rgb = parse_rgb(record.get(RGB_COLUMN).unwrap_or_default())
        .map_err(|reason| catalog_row(line, &reason))?;

    let availability = PartAvailability::from_flags(
        record
            .iter()
            .skip(FIRST_MARKER_COLUMN)
            .map(|cell| cell.trim() == AVAILABLE_MARKER),
    );

    Ok(ColorToken::new(id, name, rgb, availability))
}

/// Read every token from a catalog source
///
/// The part-type count is taken from the first data row; every later row must
/// carry the same number of marker columns.
///
/// # Errors
///
/// Returns an error if:
/// - A row cannot be read as CSV
/// - A row has the wrong column count, an empty id or a bad RGB cell
/// - The first data row has no marker columns
pub fn read_tokens<R: Read>(source: R) -> Result<Vec<ColorToken>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut tokens = Vec::new();
    let mut marker_count = None;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        let markers = *marker_count.get_or_insert(record.len().saturating_sub(FIRST_MARKER_COLUMN));
        if markers == 0 {
            return Err(catalog_row(line, &"row has no part-type marker columns"));
        }

        tokens.push(parse_row(&record, line, markers)?);
    }

    Ok(tokens)
}

impl Palette {
    /// Build a palette from any catalog source
    ///
    /// # Errors
    ///
    /// Returns an error if a row is malformed or the catalog has no rows
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Self::from_tokens(read_tokens(source)?)
    }

    /// Build a palette from a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - A row is malformed or the catalog has no rows
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MosaicError::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "reading color catalog");
        Self::from_reader(file)
    }
}
