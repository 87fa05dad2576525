//! Color catalogs and nearest-token search
//!
//! This module contains:
//! - Color tokens with their part-type availability
//! - CSV catalog ingestion
//! - The palette container and weighted nearest-token lookup

/// Catalog parsing into color tokens
pub mod catalog;
/// Palette container and nearest-token search
pub mod search;
/// Color tokens and part-type availability sets
pub mod token;

pub use search::Palette;
pub use token::{ColorToken, PartAvailability, PartType};
