//! Tier list editing.
//!
//! These operations work on the ordered tier list of a single pricing
//! record. They never reorder or renumber the remaining tiers; closing
//! gaps is left to the admin and caught by validation on submit.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::pricing::{DistanceTier, TierType};
use crate::pricing::defaults::{DEFAULT_NEW_TIER_PRICE, NEW_TIER_SPAN_MILES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    #[error("tier {index} does not exist (list has {len} tiers)")]
    OutOfRange { index: usize, len: usize },

    #[error("the first tier holds the minimum fare and cannot be removed")]
    FirstTierProtected,

    #[error("unknown tier type `{0}`, expected `fixed` or `per_mile`")]
    UnknownTierType(String),

    #[error("hourly pricing has no distance tiers")]
    HourlyMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierField {
    FromDistance,
    ToDistance,
    Price,
    Type,
}

/// Parses a non-negative decimal from free-form input.
///
/// Leading and trailing whitespace is ignored. Empty, unparsable or
/// negative input yields `fallback`.
pub fn parse_non_negative_number(input: &str, fallback: Decimal) -> Decimal {
    match Decimal::from_str(input.trim()) {
        Ok(value) if value >= Decimal::ZERO => value.normalize(),
        _ => fallback,
    }
}

/// Same contract as [`parse_non_negative_number`] for whole miles.
///
/// A leading `+` is accepted, fractional input falls back.
pub fn parse_non_negative_integer(input: &str, fallback: u32) -> u32 {
    input.trim().parse::<u32>().unwrap_or(fallback)
}

/// Appends a per-mile tier starting right after the last one.
///
/// An empty list gets the opening fixed tier starting at mile 0.
pub fn add_tier(current: &[DistanceTier]) -> Vec<DistanceTier> {
    let mut tiers = current.to_vec();

    let next = match current.last() {
        Some(last) => DistanceTier {
            from_distance: last.to_distance.saturating_add(1),
            to_distance: last.to_distance.saturating_add(NEW_TIER_SPAN_MILES),
            price: DEFAULT_NEW_TIER_PRICE,
            tier_type: TierType::PerMile,
        },
        None => DistanceTier {
            from_distance: 0,
            to_distance: NEW_TIER_SPAN_MILES,
            price: DEFAULT_NEW_TIER_PRICE,
            tier_type: TierType::Fixed,
        },
    };

    tiers.push(next);
    tiers
}

pub fn remove_tier(current: &[DistanceTier], index: usize) -> Result<Vec<DistanceTier>, TierError> {
    if index >= current.len() {
        return Err(TierError::OutOfRange {
            index,
            len: current.len(),
        });
    }
    if index == 0 {
        return Err(TierError::FirstTierProtected);
    }

    let mut tiers = current.to_vec();
    tiers.remove(index);
    Ok(tiers)
}

/// Replaces a single field of the tier at `index` with raw form input.
pub fn set_tier_field(
    current: &[DistanceTier],
    index: usize,
    field: TierField,
    raw: &str,
) -> Result<Vec<DistanceTier>, TierError> {
    let mut tiers = current.to_vec();
    let len = tiers.len();
    let tier = tiers
        .get_mut(index)
        .ok_or(TierError::OutOfRange { index, len })?;

    match field {
        TierField::FromDistance => tier.from_distance = parse_non_negative_integer(raw, 0),
        TierField::ToDistance => tier.to_distance = parse_non_negative_integer(raw, 0),
        TierField::Price => tier.price = parse_non_negative_number(raw, Decimal::ZERO),
        TierField::Type => tier.tier_type = parse_tier_type(raw)?,
    }

    Ok(tiers)
}

fn parse_tier_type(raw: &str) -> Result<TierType, TierError> {
    match raw.trim() {
        "fixed" => Ok(TierType::Fixed),
        "per_mile" => Ok(TierType::PerMile),
        other => Err(TierError::UnknownTierType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn tier(from: u32, to: u32, price: Decimal, tier_type: TierType) -> DistanceTier {
        DistanceTier {
            from_distance: from,
            to_distance: to,
            price,
            tier_type,
        }
    }

    fn sample() -> Vec<DistanceTier> {
        vec![
            tier(0, 18, dec!(109.5), TierType::Fixed),
            tier(19, 40, dec!(2.5), TierType::PerMile),
        ]
    }

    #[test]
    fn parse_number_falls_back_on_empty_or_garbage() {
        assert_eq!(parse_non_negative_number("", dec!(7)), dec!(7));
        assert_eq!(parse_non_negative_number("abc", Decimal::ZERO), Decimal::ZERO);
        assert_eq!(parse_non_negative_number("-3", Decimal::ZERO), Decimal::ZERO);
        assert_eq!(parse_non_negative_number(" 2.50 ", Decimal::ZERO), dec!(2.5));
    }

    #[test]
    fn parse_integer_rejects_fractions_and_negatives() {
        assert_eq!(parse_non_negative_integer("12", 0), 12);
        assert_eq!(parse_non_negative_integer("12.5", 0), 0);
        assert_eq!(parse_non_negative_integer("-1", 4), 4);
        assert_eq!(parse_non_negative_integer("", 0), 0);
    }

    #[test]
    fn added_tier_starts_after_previous_last() {
        let mut tiers = sample();
        for _ in 0..5 {
            let previous_end = tiers.last().unwrap().to_distance;
            tiers = add_tier(&tiers);
            let added = tiers.last().unwrap();
            assert_eq!(added.from_distance, previous_end + 1);
            assert_eq!(added.to_distance, previous_end + NEW_TIER_SPAN_MILES);
            assert_eq!(added.tier_type, TierType::PerMile);
        }
    }

    #[test]
    fn add_to_empty_list_creates_opening_fixed_tier() {
        let tiers = add_tier(&[]);
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].from_distance, 0);
        assert_eq!(tiers[0].tier_type, TierType::Fixed);
    }

    #[test]
    fn first_tier_cannot_be_removed() {
        assert_eq!(remove_tier(&sample(), 0), Err(TierError::FirstTierProtected));
        assert_eq!(
            remove_tier(&sample(), 5),
            Err(TierError::OutOfRange { index: 5, len: 2 })
        );

        let remaining = remove_tier(&sample(), 1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].to_distance, 18);
    }

    #[test]
    fn set_field_coerces_blank_input_to_zero() {
        let tiers = set_tier_field(&sample(), 1, TierField::Price, "").unwrap();
        assert_eq!(tiers[1].price, Decimal::ZERO);

        let tiers = set_tier_field(&tiers, 1, TierField::ToDistance, "55").unwrap();
        assert_eq!(tiers[1].to_distance, 55);

        let tiers = set_tier_field(&tiers, 1, TierField::Type, "fixed").unwrap();
        assert_eq!(tiers[1].tier_type, TierType::Fixed);

        assert_eq!(
            set_tier_field(&tiers, 1, TierField::Type, "hourly"),
            Err(TierError::UnknownTierType("hourly".to_string()))
        );
    }
}
