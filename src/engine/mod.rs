mod catalog_api;
mod history_api;
mod trip_api;

pub mod estimator;
pub mod fare;
pub mod matcher;
pub mod registry;


use crate::{
    api::API,
    db::DynTripStore,
    external::{announcer::DynAnnouncer, geocoding::DynGeocoder},
};

use fare::FareCalculator;
use registry::DriverRegistry;

/// Orchestrates trip transactions over an immutable driver roster.
///
/// The engine holds no per-trip state: every call takes the caller's
/// `TripTransaction` and moves it along, so one engine can serve many riders
/// while each transaction stays owned by exactly one of them.
pub struct Engine {
    registry: DriverRegistry,
    fares: FareCalculator,
    store: DynTripStore,
    geocoder: DynGeocoder,
    announcer: Option<DynAnnouncer>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all, fields(drivers = registry.len()))]
    pub fn new(
        registry: DriverRegistry,
        fares: FareCalculator,
        store: DynTripStore,
        geocoder: DynGeocoder,
    ) -> Self {
        for class in fares.missing_pricing() {
            tracing::warn!(vehicle_class = class.name(), "pricing table has no row for vehicle class");
        }

        for tag in fares.missing_surcharges() {
            tracing::warn!(capability = tag.name(), "surcharge table has no row for capability");
        }

        Self {
            registry,
            fares,
            store,
            geocoder,
            announcer: None,
        }
    }

    pub fn with_announcer(mut self, announcer: DynAnnouncer) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    pub fn fares(&self) -> &FareCalculator {
        &self.fares
    }

    /// Fire and forget: a missing or failing announcer never affects the trip.
    fn announce(&self, message: &str) {
        if let Some(announcer) = &self.announcer {
            if let Err(err) = announcer.announce(message) {
                tracing::warn!(?err, message, "announcement failed");
            }
        }
    }
}

impl API for Engine {}
