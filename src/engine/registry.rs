use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::entities::{CapabilityTag, Driver, DriverId, DriverSeed, VehicleClass};
use crate::error::{invalid_input_error, Error};

/// Immutable catalog of drivers, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct DriverRegistry {
    drivers: Vec<Driver>,
}

impl DriverRegistry {
    pub fn new(seeds: Vec<DriverSeed>) -> Result<Self, Error> {
        let mut names = HashSet::new();

        for seed in seeds.iter() {
            if seed.name.trim().is_empty() || !names.insert(seed.name.clone()) {
                tracing::warn!(name = %seed.name, "rejecting roster with blank or repeated driver name");
                return Err(invalid_input_error());
            }
        }

        let drivers = seeds
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Driver::from_seed(DriverId(index), seed))
            .collect();

        Ok(Self { drivers })
    }

    /// Parses a JSON array of `{name, capabilities, vehicle_class}` rows.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let seeds: Vec<DriverSeed> = serde_json::from_str(json).map_err(|err| {
            tracing::error!(?err, "malformed driver roster");
            invalid_input_error()
        })?;

        Self::new(seeds)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|err| {
            tracing::error!(?err, "failed to read driver roster");
            invalid_input_error()
        })?;

        Self::from_json(&json)
    }

    /// The demo roster the service ships with.
    pub fn seeded() -> Self {
        use CapabilityTag::*;
        use VehicleClass::*;

        let seeds = vec![
            DriverSeed::new("João", &[Ramp, Wheelchair], Standard),
            DriverSeed::new("Maria", &[SignLanguageInterpreter], Hybrid),
            DriverSeed::new("Carlos", &[Ramp, SignLanguageInterpreter, Wheelchair], Standard),
            DriverSeed::new("Ana", &[AssistedCommunication], Electric),
            DriverSeed::new("Pedro", &[Ramp], Standard),
            DriverSeed::new("Fernanda", &[SignLanguageInterpreter, AssistedCommunication], Hybrid),
            DriverSeed::new("Lucas", &[Ramp, AssistedCommunication], Electric),
            DriverSeed::new("Patrícia", &[Ramp, Wheelchair, Elevator], Standard),
            DriverSeed::new("Rafael", &[SignLanguageInterpreter], Hybrid),
            DriverSeed::new("Juliana", &[Ramp, Wheelchair], Standard),
            DriverSeed::new("Gustavo", &[Ramp, Wheelchair, Elevator], Electric),
            DriverSeed::new("Luciana", &[AssistedCommunication], Hybrid),
            DriverSeed::new("Eduardo", &[SignLanguageInterpreter], Standard),
            DriverSeed::new("Beatriz", &[Ramp, Wheelchair], Standard),
            DriverSeed::new("Fábio", &[Ramp, AssistedCommunication], Electric),
            DriverSeed::new("Camila", &[SignLanguageInterpreter, Wheelchair], Hybrid),
            DriverSeed::new("Marcos", &[Ramp], Standard),
            DriverSeed::new("Vanessa", &[AssistedCommunication], Electric),
            DriverSeed::new("André", &[Ramp, SignLanguageInterpreter], Standard),
            DriverSeed::new("Larissa", &[Ramp, Elevator], Hybrid),
        ];

        let drivers = seeds
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Driver::from_seed(DriverId(index), seed))
            .collect();

        Self { drivers }
    }

    /// Drivers whose capabilities are a superset of `needs`. Empty needs
    /// match everyone; callers that care reject them first.
    pub fn find_by_capabilities(&self, needs: &[CapabilityTag]) -> Vec<&Driver> {
        self.drivers
            .iter()
            .filter(|driver| driver.covers(needs))
            .collect()
    }

    pub fn get(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CapabilityTag::*;

    fn names(drivers: &[&Driver]) -> Vec<String> {
        drivers.iter().map(|driver| driver.name.clone()).collect()
    }

    #[test]
    fn seeded_roster_has_unique_names() {
        let registry = DriverRegistry::seeded();
        assert_eq!(registry.len(), 20);

        let unique: HashSet<_> = registry.iter().map(|driver| driver.name.clone()).collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn subset_match_in_insertion_order() {
        let registry = DriverRegistry::seeded();
        let matched = registry.find_by_capabilities(&[Ramp, Wheelchair]);

        assert_eq!(
            names(&matched),
            vec!["João", "Carlos", "Patrícia", "Juliana", "Gustavo", "Beatriz"]
        );
    }

    #[test]
    fn drivers_may_offer_more_than_requested() {
        let registry = DriverRegistry::seeded();
        let matched = registry.find_by_capabilities(&[Elevator]);

        assert_eq!(names(&matched), vec!["Patrícia", "Gustavo", "Larissa"]);
        assert!(matched.iter().all(|driver| driver.capabilities.len() > 1));
    }

    #[test]
    fn empty_needs_return_everyone() {
        let registry = DriverRegistry::seeded();
        assert_eq!(registry.find_by_capabilities(&[]).len(), registry.len());
    }

    #[test]
    fn handles_resolve_back_to_drivers() {
        let registry = DriverRegistry::seeded();

        for driver in registry.iter() {
            assert_eq!(registry.get(driver.id), Some(driver));
        }

        assert!(registry.get(DriverId(registry.len())).is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = DriverRegistry::new(vec![
            DriverSeed::new("Pedro", &[Ramp], VehicleClass::Standard),
            DriverSeed::new("Pedro", &[Elevator], VehicleClass::Hybrid),
        ])
        .unwrap_err();

        assert!(err.is_invalid_input_error());
    }

    #[test]
    fn roster_from_json() {
        let registry = DriverRegistry::from_json(
            r#"[
                {"name": "Ana", "capabilities": ["assisted_communication"], "vehicle_class": "electric"},
                {"name": "Pedro", "capabilities": ["ramp", "companion"], "vehicle_class": "standard"}
            ]"#,
        )
        .unwrap();

        assert_eq!(names(&registry.find_by_capabilities(&[Companion])), vec!["Pedro"]);
        assert!(DriverRegistry::from_json("{").unwrap_err().is_invalid_input_error());
    }
}
