//! Vehicle class pricing plus per-accommodation surcharges.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::entities::{CapabilityTag, Driver, Quote, VehicleClass};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehiclePricing {
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
}

impl VehiclePricing {
    pub const fn new(base_fare: f64, per_km_rate: f64, per_minute_rate: f64) -> Self {
        Self {
            base_fare,
            per_km_rate,
            per_minute_rate,
        }
    }

    fn is_valid(&self) -> bool {
        [self.base_fare, self.per_km_rate, self.per_minute_rate]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Applied when a vehicle class has no pricing row.
pub const FALLBACK_PRICING: VehiclePricing = VehiclePricing::new(4.00, 1.40, 0.25);

pub fn default_pricing() -> HashMap<VehicleClass, VehiclePricing> {
    HashMap::from([
        (VehicleClass::Standard, VehiclePricing::new(4.00, 1.40, 0.25)),
        (VehicleClass::Hybrid, VehiclePricing::new(4.50, 1.30, 0.23)),
        (VehicleClass::Electric, VehiclePricing::new(5.00, 1.20, 0.20)),
    ])
}

pub fn default_surcharges() -> HashMap<CapabilityTag, f64> {
    HashMap::from([
        (CapabilityTag::Ramp, 2.00),
        (CapabilityTag::Elevator, 3.50),
        (CapabilityTag::AssistedCommunication, 1.50),
        (CapabilityTag::Companion, 2.50),
        (CapabilityTag::SignLanguageInterpreter, 1.00),
        (CapabilityTag::Wheelchair, 0.00),
    ])
}

/// Decimal value of a float as it prints, so `1.005` stays `1.005` rather
/// than the binary value just below it.
fn to_decimal(amount: f64) -> Decimal {
    amount.to_string().parse().unwrap_or_else(|err| {
        tracing::warn!(amount, ?err, "amount has no decimal form, using zero");
        Decimal::ZERO
    })
}

fn to_cents(amount: Decimal) -> f64 {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Rounds half up to cents.
pub fn round_currency(amount: f64) -> f64 {
    to_cents(to_decimal(amount))
}

/// One row of the published tariff table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceCatalogEntry {
    Vehicle {
        vehicle_class: VehicleClass,
        label: String,
        pricing: VehiclePricing,
    },
    Adaptation {
        capability: CapabilityTag,
        label: String,
        surcharge: f64,
    },
}

#[derive(Debug)]
pub struct FareCalculator {
    pricing: HashMap<VehicleClass, VehiclePricing>,
    surcharges: HashMap<CapabilityTag, f64>,
    integrity_warnings: AtomicU64,
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self {
            pricing: default_pricing(),
            surcharges: default_surcharges(),
            integrity_warnings: AtomicU64::new(0),
        }
    }
}

impl FareCalculator {
    /// Tables may be incomplete, but every amount must be a non-negative number.
    pub fn new(
        pricing: HashMap<VehicleClass, VehiclePricing>,
        surcharges: HashMap<CapabilityTag, f64>,
    ) -> Result<Self, Error> {
        if !pricing.values().all(VehiclePricing::is_valid) {
            return Err(invalid_input_error());
        }

        if !surcharges
            .values()
            .all(|value| value.is_finite() && *value >= 0.0)
        {
            return Err(invalid_input_error());
        }

        Ok(Self {
            pricing,
            surcharges,
            integrity_warnings: AtomicU64::new(0),
        })
    }

    pub fn pricing_for(&self, vehicle_class: VehicleClass) -> VehiclePricing {
        match self.pricing.get(&vehicle_class) {
            Some(pricing) => *pricing,
            None => {
                self.integrity_warnings.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    vehicle_class = vehicle_class.name(),
                    "no pricing for vehicle class, using fallback tariff"
                );
                FALLBACK_PRICING
            }
        }
    }

    pub fn surcharge_for(&self, tag: CapabilityTag) -> f64 {
        match self.surcharges.get(&tag) {
            Some(surcharge) => *surcharge,
            None => {
                self.integrity_warnings.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(capability = tag.name(), "no surcharge for capability, charging zero");
                0.0
            }
        }
    }

    #[tracing::instrument(skip(self, driver), fields(driver = %driver.name))]
    pub fn quote(
        &self,
        driver: &Driver,
        distance_km: f64,
        duration_min: u32,
        needs: &[CapabilityTag],
    ) -> Quote {
        let pricing = self.pricing_for(driver.vehicle_class);
        let surcharge_total: Decimal = needs
            .iter()
            .map(|tag| to_decimal(self.surcharge_for(*tag)))
            .sum();

        let price_total = to_cents(
            to_decimal(pricing.base_fare)
                + to_decimal(distance_km) * to_decimal(pricing.per_km_rate)
                + Decimal::from(duration_min) * to_decimal(pricing.per_minute_rate)
                + surcharge_total,
        );

        Quote {
            driver_id: driver.id,
            driver_name: driver.name.clone(),
            distance_km,
            duration_min,
            vehicle_class: driver.vehicle_class,
            surcharge_total: to_cents(surcharge_total),
            price_total,
        }
    }

    /// Number of fallbacks applied since start-up.
    pub fn integrity_warnings(&self) -> u64 {
        self.integrity_warnings.load(Ordering::Relaxed)
    }

    pub fn missing_pricing(&self) -> Vec<VehicleClass> {
        VehicleClass::ALL
            .iter()
            .copied()
            .filter(|class| !self.pricing.contains_key(class))
            .collect()
    }

    pub fn missing_surcharges(&self) -> Vec<CapabilityTag> {
        CapabilityTag::ALL
            .iter()
            .copied()
            .filter(|tag| !self.surcharges.contains_key(tag))
            .collect()
    }

    /// Vehicle rows first, then accommodation rows; gaps show their fallback.
    pub fn catalog(&self) -> Vec<PriceCatalogEntry> {
        let vehicles = VehicleClass::ALL.iter().map(|class| PriceCatalogEntry::Vehicle {
            vehicle_class: *class,
            label: class.label().into(),
            pricing: self.pricing.get(class).copied().unwrap_or(FALLBACK_PRICING),
        });

        let adaptations = CapabilityTag::ALL.iter().map(|tag| PriceCatalogEntry::Adaptation {
            capability: *tag,
            label: tag.label().into(),
            surcharge: self.surcharges.get(tag).copied().unwrap_or(0.0),
        });

        vehicles.chain(adaptations).collect()
    }
}
