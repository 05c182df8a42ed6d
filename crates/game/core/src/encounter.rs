//! Weighted random selection and wild encounter tables.

use rand::Rng;

use crate::error::{ErrorSeverity, GameError};
use crate::types::SpeciesId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    #[error("cannot pick from an empty list")]
    Empty,

    #[error("all weights are zero")]
    ZeroTotalWeight,
}

impl GameError for PickError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "PICK_EMPTY",
            Self::ZeroTotalWeight => "PICK_ZERO_TOTAL_WEIGHT",
        }
    }
}

fn total_weight<T>(items: &[(T, u32)]) -> Result<u64, PickError> {
    if items.is_empty() {
        return Err(PickError::Empty);
    }
    let total: u64 = items.iter().map(|(_, weight)| u64::from(*weight)).sum();
    if total == 0 {
        return Err(PickError::ZeroTotalWeight);
    }
    Ok(total)
}

/// Returns the first item whose cumulative weight is strictly greater than
/// `draw`. `draw` must lie in `[0, total)`; larger draws fall back to the last
/// item with a non-zero weight.
pub fn select_by_draw<T>(items: &[(T, u32)], draw: u64) -> Result<&T, PickError> {
    total_weight(items)?;

    let mut cumulative = 0u64;
    let mut last_weighted = None;
    for (item, weight) in items {
        if *weight == 0 {
            continue;
        }
        cumulative += u64::from(*weight);
        last_weighted = Some(item);
        if cumulative > draw {
            return Ok(item);
        }
    }
    last_weighted.ok_or(PickError::ZeroTotalWeight)
}

/// Picks one item with probability proportional to its weight.
///
/// # Errors
///
/// [`PickError::Empty`] for an empty slice and [`PickError::ZeroTotalWeight`]
/// when every weight is zero.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(
    items: &'a [(T, u32)],
    rng: &mut R,
) -> Result<&'a T, PickError> {
    let total = total_weight(items)?;
    let draw = rng.gen_range(0..total);
    select_by_draw(items, draw)
}

/// Species that can appear on tiles of one encounter area.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterTable {
    pub area: u16,
    pub species: Vec<(SpeciesId, u32)>,
}

impl EncounterTable {
    pub fn new(area: u16, species: Vec<(SpeciesId, u32)>) -> Self {
        Self { area, species }
    }

    /// Rolls for a wild encounter after a finished step.
    ///
    /// `chance_percent` is clamped to 100. The table is validated before any
    /// randomness is consumed, so a broken table fails on every roll.
    pub fn roll<R: Rng + ?Sized>(
        &self,
        chance_percent: u32,
        rng: &mut R,
    ) -> Result<Option<SpeciesId>, PickError> {
        total_weight(&self.species)?;

        if rng.gen_range(0..100) >= chance_percent.min(100) {
            return Ok(None);
        }
        weighted_pick(&self.species, rng).map(|species| Some(*species))
    }
}
