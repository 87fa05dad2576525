//! Color tokens and the part types each one is sold as

use bitvec::prelude::*;
use std::fmt;

use crate::color::conversion::srgb_to_lab;
use crate::color::lab::Lab;

/// Index of a physical part category (marker column in the catalog)
pub type PartType = usize;

/// Fixed-size set of part types a color token can be bought as
///
/// The cardinality is fixed at construction and equals the number of
/// availability columns of the catalog the token came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartAvailability {
    bits: BitVec,
}

impl PartAvailability {
    /// Create a set over `part_types` categories with nothing available
    pub fn none(part_types: usize) -> Self {
        Self {
            bits: bitvec![0; part_types],
        }
    }

    /// Create a set with every one of `part_types` categories available
    pub fn all(part_types: usize) -> Self {
        Self {
            bits: bitvec![1; part_types],
        }
    }

    /// Build from one flag per part type, in column order
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self {
            bits: flags.into_iter().collect(),
        }
    }

    /// Mark a part type as available; out-of-range part types are ignored
    pub fn insert(&mut self, part_type: PartType) {
        if part_type < self.bits.len() {
            self.bits.set(part_type, true);
        }
    }

    /// Test whether the token exists as `part_type`
    pub fn contains(&self, part_type: PartType) -> bool {
        self.bits.get(part_type).as_deref() == Some(&true)
    }

    /// Number of part-type categories this set ranges over
    pub fn part_type_count(&self) -> usize {
        self.bits.len()
    }

    /// Number of available part types
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Available part types in ascending order
    pub fn to_vec(&self) -> Vec<PartType> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PartAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "+" } else { "-" })?;
        }
        Ok(())
    }
}

/// One purchasable color with its perceptual coordinates
///
/// The Lab value is derived from the device RGB once, at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorToken {
    id: String,
    name: String,
    rgb: [u8; 3],
    lab: Lab,
    availability: PartAvailability,
}

impl ColorToken {
    /// Create a token and derive its Lab coordinates from `rgb`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rgb: [u8; 3],
        availability: PartAvailability,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rgb,
            lab: srgb_to_lab(rgb),
            availability,
        }
    }

    /// Catalog identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device RGB triplet
    pub const fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Perceptual coordinates
    pub const fn lab(&self) -> Lab {
        self.lab
    }

    /// Part types this color is sold as
    pub const fn availability(&self) -> &PartAvailability {
        &self.availability
    }

    /// Whether the token can be placed where `part_type` is required
    pub fn is_available_as(&self, part_type: PartType) -> bool {
        self.availability.contains(part_type)
    }
}
