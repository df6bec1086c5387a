//! Editable pricing form and payload assembly.

use rust_decimal::Decimal;

use crate::models::pricing::{
    DistanceRates, PricingMode, PricingPayload, PricingRates, PricingRecord, PricingStatus,
};
use crate::pricing::defaults::standard_payload;
use crate::pricing::tiers::{
    self, parse_non_negative_integer, parse_non_negative_number, TierError, TierField,
};
use crate::pricing::validation::{validate_payload, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraField {
    ExtraStop,
    ChildSeat,
    Congestion,
    AirportPickup,
    AirportDropoff,
    ParkingIncluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    AfterDistanceThreshold,
    AfterDistancePricePerMile,
    HourlyRate,
    MinimumHours,
    AdditionalHourCharge,
    MilesIncluded,
    ExcessMileageCharge,
}

/// In-memory form state of one pricing editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingForm {
    values: PricingPayload,
}

impl PricingForm {
    pub fn with_defaults(mode: PricingMode) -> Self {
        Self {
            values: standard_payload(mode),
        }
    }

    pub fn from_record(record: &PricingRecord) -> Self {
        Self {
            values: record.payload(),
        }
    }

    pub fn values(&self) -> &PricingPayload {
        &self.values
    }

    pub fn mode(&self) -> PricingMode {
        self.values.rates.mode()
    }

    pub fn set_zone(&mut self, zone: &str) {
        self.values.zone = zone.to_string();
    }

    pub fn set_display_vat_inclusive(&mut self, value: bool) {
        self.values.display_vat_inclusive = value;
    }

    pub fn set_display_parking_inclusive(&mut self, value: bool) {
        self.values.display_parking_inclusive = value;
    }

    pub fn set_price_round_off(&mut self, value: bool) {
        self.values.price_round_off = value;
    }

    pub fn set_status(&mut self, status: PricingStatus) {
        self.values.status = status;
    }

    pub fn add_tier(&mut self) -> Result<(), TierError> {
        let rates = self.distance_rates()?;
        rates.distance_tiers = tiers::add_tier(&rates.distance_tiers);
        Ok(())
    }

    pub fn remove_tier(&mut self, index: usize) -> Result<(), TierError> {
        let rates = self.distance_rates()?;
        rates.distance_tiers = tiers::remove_tier(&rates.distance_tiers, index)?;
        Ok(())
    }

    pub fn set_tier_field(
        &mut self,
        index: usize,
        field: TierField,
        raw: &str,
    ) -> Result<(), TierError> {
        let rates = self.distance_rates()?;
        rates.distance_tiers = tiers::set_tier_field(&rates.distance_tiers, index, field, raw)?;
        Ok(())
    }

    pub fn set_extra(&mut self, field: ExtraField, raw: &str) {
        let value = parse_non_negative_number(raw, Decimal::ZERO);
        let extras = &mut self.values.extras;
        match field {
            ExtraField::ExtraStop => extras.extra_stop_price = value,
            ExtraField::ChildSeat => extras.child_seat_price = value,
            ExtraField::Congestion => extras.congestion_charge = value,
            ExtraField::AirportPickup => extras.airport_pickup_charge = value,
            ExtraField::AirportDropoff => extras.airport_dropoff_charge = value,
            ExtraField::ParkingIncluded => extras.parking_included = value,
        }
    }

    /// Sets a scalar rate from raw input. Fields of the other mode are ignored.
    pub fn set_rate(&mut self, field: RateField, raw: &str) {
        match (&mut self.values.rates, field) {
            (PricingRates::P2p(rates), RateField::AfterDistanceThreshold) => {
                rates.after_distance_threshold = parse_non_negative_integer(raw, 0)
            }
            (PricingRates::P2p(rates), RateField::AfterDistancePricePerMile) => {
                rates.after_distance_price_per_mile = parse_non_negative_number(raw, Decimal::ZERO)
            }
            (PricingRates::Hourly(rates), RateField::HourlyRate) => {
                rates.hourly_rate = parse_non_negative_number(raw, Decimal::ZERO)
            }
            (PricingRates::Hourly(rates), RateField::MinimumHours) => {
                rates.minimum_hours = parse_non_negative_integer(raw, 0)
            }
            (PricingRates::Hourly(rates), RateField::AdditionalHourCharge) => {
                rates.additional_hour_charge = parse_non_negative_number(raw, Decimal::ZERO)
            }
            (PricingRates::Hourly(rates), RateField::MilesIncluded) => {
                rates.miles_included = parse_non_negative_integer(raw, 0)
            }
            (PricingRates::Hourly(rates), RateField::ExcessMileageCharge) => {
                rates.excess_mileage_charge = parse_non_negative_number(raw, Decimal::ZERO)
            }
            _ => {}
        }
    }

    /// Builds the normalised upsert payload, or every validation problem.
    pub fn assemble(&self) -> Result<PricingPayload, Vec<ValidationIssue>> {
        let payload = normalize(self.values.clone());
        let issues = validate_payload(&payload);
        if issues.is_empty() {
            Ok(payload)
        } else {
            Err(issues)
        }
    }

    fn distance_rates(&mut self) -> Result<&mut DistanceRates, TierError> {
        match &mut self.values.rates {
            PricingRates::P2p(rates) => Ok(rates),
            PricingRates::Hourly(_) => Err(TierError::HourlyMode),
        }
    }
}

/// Trims the zone and orders tiers by their lower bound.
pub fn normalize(mut payload: PricingPayload) -> PricingPayload {
    payload.zone = payload.zone.trim().to_string();
    if let PricingRates::P2p(rates) = &mut payload.rates {
        rates
            .distance_tiers
            .sort_by_key(|tier| (tier.from_distance, tier.to_distance));
    }
    payload
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::pricing::{DistanceTier, TierType};

    fn p2p_tiers(form: &PricingForm) -> &[DistanceTier] {
        match &form.values().rates {
            PricingRates::P2p(rates) => &rates.distance_tiers,
            PricingRates::Hourly(_) => panic!("expected p2p form"),
        }
    }

    #[test]
    fn default_form_assembles_cleanly() {
        let payload = PricingForm::with_defaults(PricingMode::P2p).assemble().unwrap();
        assert_eq!(payload.rates.mode(), PricingMode::P2p);
        assert_eq!(payload.extras.extra_stop_price, dec!(10));
    }

    #[test]
    fn adding_a_tier_requires_moving_the_threshold() {
        let mut form = PricingForm::with_defaults(PricingMode::P2p);
        form.add_tier().unwrap();
        assert_eq!(p2p_tiers(&form).last().unwrap().from_distance, 51);

        let issues = form.assemble().unwrap_err();
        assert_eq!(issues[0].field, "afterDistanceThreshold");

        form.set_rate(RateField::AfterDistanceThreshold, "60");
        assert!(form.assemble().is_ok());
    }

    #[test]
    fn removing_every_tier_but_first_then_submitting_empty_is_impossible() {
        let mut form = PricingForm::with_defaults(PricingMode::P2p);
        form.remove_tier(2).unwrap();
        form.remove_tier(1).unwrap();
        assert_eq!(form.remove_tier(0), Err(TierError::FirstTierProtected));
        assert_eq!(p2p_tiers(&form).len(), 1);
    }

    #[test]
    fn assembly_sorts_tiers_and_trims_zone() {
        let mut form = PricingForm::with_defaults(PricingMode::P2p);
        form.set_zone("  Central London ");
        // swap the two per-mile tiers' bounds so the list is out of order
        form.set_tier_field(1, TierField::FromDistance, "41").unwrap();
        form.set_tier_field(1, TierField::ToDistance, "50").unwrap();
        form.set_tier_field(2, TierField::FromDistance, "19").unwrap();
        form.set_tier_field(2, TierField::ToDistance, "40").unwrap();

        let payload = form.assemble().unwrap();
        assert_eq!(payload.zone, "Central London");
        let PricingRates::P2p(rates) = payload.rates else {
            panic!("expected p2p payload");
        };
        let bounds: Vec<_> = rates
            .distance_tiers
            .iter()
            .map(|tier| (tier.from_distance, tier.to_distance, tier.tier_type))
            .collect();
        assert_eq!(
            bounds,
            vec![
                (0, 18, TierType::Fixed),
                (19, 40, TierType::PerMile),
                (41, 50, TierType::PerMile)
            ]
        );
    }

    #[test]
    fn hourly_form_rejects_tier_edits() {
        let mut form = PricingForm::with_defaults(PricingMode::Hourly);
        assert_eq!(form.add_tier(), Err(TierError::HourlyMode));

        form.set_rate(RateField::MinimumHours, "");
        let issues = form.assemble().unwrap_err();
        assert_eq!(issues[0].field, "minimumHours");
    }

    #[test]
    fn extras_fall_back_to_zero_on_blank_input() {
        let mut form = PricingForm::with_defaults(PricingMode::P2p);
        form.set_extra(ExtraField::ExtraStop, "");
        form.set_extra(ExtraField::Congestion, "15.00");
        assert_eq!(form.values().extras.extra_stop_price, Decimal::ZERO);
        assert_eq!(form.values().extras.congestion_charge, dec!(15));
    }
}
