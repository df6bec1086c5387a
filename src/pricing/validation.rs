//! Pre-submission checks for pricing payloads.
//!
//! Tiers must partition `[0, afterDistanceThreshold]` in ascending order
//! with no gaps or overlaps, and only the opening tier may be `fixed`.
//! All problems are collected so the editor can show them at once.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::pricing::{DistanceTier, PricingPayload, PricingRates, TierType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `distanceTiers[1].toDistance`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_tiers(tiers: &[DistanceTier], threshold: u32) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(first) = tiers.first() else {
        issues.push(ValidationIssue::new(
            "distanceTiers",
            "at least one distance tier is required",
        ));
        return issues;
    };

    if first.from_distance != 0 {
        issues.push(ValidationIssue::new(
            "distanceTiers[0].fromDistance",
            format!("first tier must start at 0, got {}", first.from_distance),
        ));
    }

    for (index, tier) in tiers.iter().enumerate() {
        if tier.to_distance < tier.from_distance {
            issues.push(ValidationIssue::new(
                format!("distanceTiers[{index}].toDistance"),
                format!(
                    "must be >= fromDistance ({} < {})",
                    tier.to_distance, tier.from_distance
                ),
            ));
        }

        if tier.price < Decimal::ZERO {
            issues.push(ValidationIssue::new(
                format!("distanceTiers[{index}].price"),
                "must not be negative",
            ));
        }

        if index > 0 && tier.tier_type == TierType::Fixed {
            issues.push(ValidationIssue::new(
                format!("distanceTiers[{index}].type"),
                "only the first tier may be fixed",
            ));
        }
    }

    for (index, pair) in tiers.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let expected = u64::from(previous.to_distance) + 1;
        let actual = u64::from(current.from_distance);

        if actual > expected {
            issues.push(ValidationIssue::new(
                format!("distanceTiers[{}].fromDistance", index + 1),
                format!("gap after mile {}: expected {expected}", previous.to_distance),
            ));
        } else if actual < expected {
            issues.push(ValidationIssue::new(
                format!("distanceTiers[{}].fromDistance", index + 1),
                format!("overlaps previous tier ending at mile {}", previous.to_distance),
            ));
        }
    }

    if let Some(last) = tiers.last() {
        if last.to_distance != threshold {
            issues.push(ValidationIssue::new(
                "afterDistanceThreshold",
                format!(
                    "must equal the last tier's toDistance ({}), got {threshold}",
                    last.to_distance
                ),
            ));
        }
    }

    issues
}

pub fn validate_payload(payload: &PricingPayload) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match &payload.rates {
        PricingRates::P2p(rates) => {
            issues.extend(validate_tiers(
                &rates.distance_tiers,
                rates.after_distance_threshold,
            ));
            check_non_negative(
                &mut issues,
                "afterDistancePricePerMile",
                rates.after_distance_price_per_mile,
            );
        }
        PricingRates::Hourly(rates) => {
            check_non_negative(&mut issues, "hourlyRate", rates.hourly_rate);
            check_non_negative(&mut issues, "additionalHourCharge", rates.additional_hour_charge);
            check_non_negative(&mut issues, "excessMileageCharge", rates.excess_mileage_charge);
            if rates.minimum_hours == 0 {
                issues.push(ValidationIssue::new("minimumHours", "must be at least 1"));
            }
        }
    }

    for (name, value) in payload.extras.iter() {
        check_non_negative(&mut issues, &format!("extras.{name}"), value);
    }

    issues
}

fn check_non_negative(issues: &mut Vec<ValidationIssue>, field: &str, value: Decimal) {
    if value < Decimal::ZERO {
        issues.push(ValidationIssue::new(field, "must not be negative"));
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::pricing::{Extras, HourlyRates, PricingStatus};

    fn tier(from: u32, to: u32, tier_type: TierType) -> DistanceTier {
        DistanceTier {
            from_distance: from,
            to_distance: to,
            price: dec!(2.5),
            tier_type,
        }
    }

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|issue| issue.field.as_str()).collect()
    }

    #[test]
    fn contiguous_tiers_pass() {
        let tiers = vec![
            tier(0, 18, TierType::Fixed),
            tier(19, 40, TierType::PerMile),
            tier(41, 50, TierType::PerMile),
        ];
        assert!(validate_tiers(&tiers, 50).is_empty());
    }

    #[test]
    fn empty_tier_list_is_rejected() {
        assert_eq!(fields(&validate_tiers(&[], 0)), vec!["distanceTiers"]);
    }

    #[test]
    fn inverted_tier_is_rejected() {
        let tiers = vec![tier(0, 18, TierType::Fixed), tier(19, 10, TierType::PerMile)];
        let issues = validate_tiers(&tiers, 10);
        assert!(fields(&issues).contains(&"distanceTiers[1].toDistance"));
    }

    #[test]
    fn gaps_and_overlaps_are_reported_separately() {
        let gap = vec![tier(0, 18, TierType::Fixed), tier(25, 40, TierType::PerMile)];
        let issues = validate_tiers(&gap, 40);
        assert_eq!(fields(&issues), vec!["distanceTiers[1].fromDistance"]);
        assert!(issues[0].message.starts_with("gap"));

        let overlap = vec![tier(0, 18, TierType::Fixed), tier(15, 40, TierType::PerMile)];
        let issues = validate_tiers(&overlap, 40);
        assert!(issues[0].message.starts_with("overlaps"));
    }

    #[test]
    fn tiers_must_start_at_zero_and_end_at_threshold() {
        let tiers = vec![tier(1, 18, TierType::Fixed)];
        let issues = validate_tiers(&tiers, 30);
        assert_eq!(
            fields(&issues),
            vec!["distanceTiers[0].fromDistance", "afterDistanceThreshold"]
        );
    }

    #[test]
    fn fixed_tier_only_allowed_first() {
        let tiers = vec![tier(0, 18, TierType::Fixed), tier(19, 40, TierType::Fixed)];
        assert_eq!(
            fields(&validate_tiers(&tiers, 40)),
            vec!["distanceTiers[1].type"]
        );
    }

    #[test]
    fn hourly_payload_needs_minimum_hours() {
        let payload = PricingPayload {
            zone: "London".to_string(),
            rates: PricingRates::Hourly(HourlyRates {
                hourly_rate: dec!(60),
                minimum_hours: 0,
                additional_hour_charge: dec!(55),
                miles_included: 20,
                excess_mileage_charge: dec!(-1),
            }),
            extras: Extras {
                child_seat_price: dec!(-5),
                ..Extras::default()
            },
            display_vat_inclusive: false,
            display_parking_inclusive: false,
            price_round_off: false,
            status: PricingStatus::Active,
        };

        assert_eq!(
            fields(&validate_payload(&payload)),
            vec!["excessMileageCharge", "minimumHours", "extras.childSeatPrice"]
        );
    }
}
