//! Palette container and nearest-token search
//!
//! The search is a linear scan over the catalog. Catalogs hold tens of
//! tokens, so a spatial index would not change the asymptotics that matter.

use tracing::debug;

use crate::color::lab::Lab;
use crate::io::error::{MosaicError, Result};
use crate::palette::token::{ColorToken, PartType};
use crate::topology::stencil::Topology;

/// Ordered, read-only collection of color tokens
///
/// Every token ranges over the same number of part types. Built once per
/// catalog source and shared by reference across any number of passes.
#[derive(Clone, Debug)]
pub struct Palette {
    tokens: Vec<ColorToken>,
    part_type_count: usize,
}

impl Palette {
    /// Create a palette from tokens in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tokens are supplied
    /// - Tokens disagree on the number of part types
    pub fn from_tokens(tokens: Vec<ColorToken>) -> Result<Self> {
        let part_type_count = tokens
            .first()
            .ok_or(MosaicError::EmptyCatalog)?
            .availability()
            .part_type_count();

        if let Some((index, token)) = tokens
            .iter()
            .enumerate()
            .find(|(_, token)| token.availability().part_type_count() != part_type_count)
        {
            return Err(MosaicError::TokenPartCount {
                index,
                id: token.id().to_owned(),
                expected: part_type_count,
                actual: token.availability().part_type_count(),
            });
        }

        debug!(
            tokens = tokens.len(),
            part_types = part_type_count,
            "palette built"
        );

        Ok(Self {
            tokens,
            part_type_count,
        })
    }

    /// Tokens in catalog order
    pub fn tokens(&self) -> &[ColorToken] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the palette has no tokens (never true for a constructed palette)
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of part-type categories every token ranges over
    pub const fn part_type_count(&self) -> usize {
        self.part_type_count
    }

    /// Whether at least one token is available as `part_type`
    pub fn covers(&self, part_type: PartType) -> bool {
        self.tokens
            .iter()
            .any(|token| token.is_available_as(part_type))
    }

    /// Check the coverage precondition for every part type a topology uses
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The topology names a part type beyond this palette's range
    /// - No token is available for one of the topology's part types
    pub fn validate_for(&self, topology: &Topology) -> Result<()> {
        for &part_type in topology.group_parts() {
            if part_type >= self.part_type_count {
                return Err(MosaicError::PartTypeMismatch {
                    topology: part_type,
                    palette: self.part_type_count,
                });
            }
            if !self.covers(part_type) {
                return Err(MosaicError::UncoveredPartType { part_type });
            }
        }
        Ok(())
    }

    /// Find the closest token that is available as `part_type`
    ///
    /// Distance is the squared Lab difference with the lightness term scaled
    /// by `luminance_weight`. Ties keep the earliest token in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::NoCandidate`] when no token offers `part_type`.
    /// That only happens when the coverage precondition was not checked.
    pub fn nearest_available(
        &self,
        target: Lab,
        part_type: PartType,
        luminance_weight: f32,
    ) -> Result<&ColorToken> {
        let mut best: Option<(&ColorToken, f32)> = None;

        for token in self
            .tokens
            .iter()
            .filter(|token| token.is_available_as(part_type))
        {
            let distance = target.weighted_distance_squared(token.lab(), luminance_weight);
            if best.is_none_or(|(_, min)| distance < min) {
                best = Some((token, distance));
            }
        }

        best.map(|(token, _)| token)
            .ok_or(MosaicError::NoCandidate { part_type })
    }
}
