use serde::{Deserialize, Serialize};

use crate::engine::registry::DriverRegistry;
use crate::entities::{CapabilityTag, Driver};
use crate::error::{empty_needs_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "drivers", rename_all = "snake_case")]
pub enum MatchResult {
    Found(Vec<Driver>),
    NoneFound,
}

impl MatchResult {
    pub fn drivers(&self) -> &[Driver] {
        match self {
            Self::Found(drivers) => drivers,
            Self::NoneFound => &[],
        }
    }
}

/// Filters the registry down to drivers covering every need. Empty needs
/// are a caller error, not an empty match.
pub fn find_matches(registry: &DriverRegistry, needs: &[CapabilityTag]) -> Result<MatchResult, Error> {
    if needs.is_empty() {
        return Err(empty_needs_error());
    }

    let drivers: Vec<Driver> = registry
        .find_by_capabilities(needs)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(needs = ?needs, matched = drivers.len(), "matched drivers");

    if drivers.is_empty() {
        return Ok(MatchResult::NoneFound);
    }

    Ok(MatchResult::Found(drivers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DriverSeed, VehicleClass};
    use CapabilityTag::*;

    #[test]
    fn empty_needs_is_validation_error() {
        let err = find_matches(&DriverRegistry::seeded(), &[]).unwrap_err();
        assert!(err.is_empty_needs_error());

        let err = find_matches(&DriverRegistry::default(), &[]).unwrap_err();
        assert!(err.is_empty_needs_error());
    }

    #[test]
    fn ramp_and_wheelchair_include_joao() {
        let result = find_matches(&DriverRegistry::seeded(), &[Ramp, Wheelchair]).unwrap();
        let joao = result
            .drivers()
            .iter()
            .find(|driver| driver.name == "João")
            .unwrap();

        assert_eq!(joao.vehicle_class, VehicleClass::Standard);
    }

    #[test]
    fn nobody_offers_companion_in_seeded_roster() {
        let result = find_matches(&DriverRegistry::seeded(), &[Companion]).unwrap();
        assert_eq!(result, MatchResult::NoneFound);
        assert!(result.drivers().is_empty());
    }

    #[test]
    fn assisted_communication_without_provider() {
        let registry = DriverRegistry::new(vec![
            DriverSeed::new("João", &[Ramp, Wheelchair], VehicleClass::Standard),
            DriverSeed::new("Maria", &[SignLanguageInterpreter], VehicleClass::Hybrid),
        ])
        .unwrap();

        let result = find_matches(&registry, &[AssistedCommunication]).unwrap();
        assert_eq!(result, MatchResult::NoneFound);
    }
}
