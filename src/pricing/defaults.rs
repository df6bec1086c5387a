//! Business defaults for a pricing record that has never been saved.
//!
//! A freshly selected vehicle or (location, vehicle) pair with no stored
//! pricing starts from these values. They are policy, not derived from
//! stored configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::pricing::{
    DistanceRates, DistanceTier, Extras, HourlyRates, PricingMode, PricingPayload, PricingRates,
    PricingStatus, TierType,
};

/// Miles covered by a tier appended with `add_tier`.
pub const NEW_TIER_SPAN_MILES: u32 = 10;

pub const DEFAULT_NEW_TIER_PRICE: Decimal = dec!(2.5);

/// Minimum fare tier followed by two per-mile tiers.
pub const DEFAULT_DISTANCE_TIERS: [DistanceTier; 3] = [
    DistanceTier {
        from_distance: 0,
        to_distance: 18,
        price: dec!(109.5),
        tier_type: TierType::Fixed,
    },
    DistanceTier {
        from_distance: 19,
        to_distance: 40,
        price: dec!(2.5),
        tier_type: TierType::PerMile,
    },
    DistanceTier {
        from_distance: 41,
        to_distance: 50,
        price: dec!(2.5),
        tier_type: TierType::PerMile,
    },
];

pub const DEFAULT_AFTER_DISTANCE_THRESHOLD: u32 = 50;
pub const DEFAULT_AFTER_DISTANCE_PRICE_PER_MILE: Decimal = dec!(2.5);
pub const DEFAULT_EXTRA_STOP_PRICE: Decimal = dec!(10);

pub const DEFAULT_HOURLY_RATE: Decimal = dec!(65);
pub const DEFAULT_MINIMUM_HOURS: u32 = 3;
pub const DEFAULT_ADDITIONAL_HOUR_CHARGE: Decimal = dec!(65);
pub const DEFAULT_MILES_INCLUDED: u32 = 30;
pub const DEFAULT_EXCESS_MILEAGE_CHARGE: Decimal = dec!(2.5);

/// The form contents shown for a key with no stored pricing.
pub fn standard_payload(mode: PricingMode) -> PricingPayload {
    let rates = match mode {
        PricingMode::P2p => PricingRates::P2p(DistanceRates {
            distance_tiers: DEFAULT_DISTANCE_TIERS.to_vec(),
            after_distance_threshold: DEFAULT_AFTER_DISTANCE_THRESHOLD,
            after_distance_price_per_mile: DEFAULT_AFTER_DISTANCE_PRICE_PER_MILE,
        }),
        PricingMode::Hourly => PricingRates::Hourly(HourlyRates {
            hourly_rate: DEFAULT_HOURLY_RATE,
            minimum_hours: DEFAULT_MINIMUM_HOURS,
            additional_hour_charge: DEFAULT_ADDITIONAL_HOUR_CHARGE,
            miles_included: DEFAULT_MILES_INCLUDED,
            excess_mileage_charge: DEFAULT_EXCESS_MILEAGE_CHARGE,
        }),
    };

    PricingPayload {
        zone: String::new(),
        rates,
        extras: Extras {
            extra_stop_price: DEFAULT_EXTRA_STOP_PRICE,
            ..Extras::default()
        },
        display_vat_inclusive: false,
        display_parking_inclusive: false,
        price_round_off: false,
        status: PricingStatus::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::validation::validate_tiers;

    #[test]
    fn default_tiers_partition_up_to_threshold() {
        assert!(validate_tiers(&DEFAULT_DISTANCE_TIERS, DEFAULT_AFTER_DISTANCE_THRESHOLD).is_empty());
    }

    #[test]
    fn only_extra_stop_has_a_default_surcharge() {
        let defaults = standard_payload(PricingMode::P2p);
        let non_zero: Vec<_> = defaults
            .extras
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(name, _)| name)
            .collect();
        assert_eq!(non_zero, vec!["extraStopPrice"]);
    }
}
