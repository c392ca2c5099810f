use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::CapabilityTag;

/// Opaque handle handed out by the driver registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub(crate) usize);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Standard,
    Hybrid,
    Electric,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::Standard,
        VehicleClass::Hybrid,
        VehicleClass::Electric,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hybrid => "hybrid",
            Self::Electric => "electric",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Comum",
            Self::Hybrid => "Híbrido",
            Self::Electric => "Elétrico",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub capabilities: BTreeSet<CapabilityTag>,
    pub vehicle_class: VehicleClass,
}

/// Roster row before the registry has assigned it a handle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverSeed {
    pub name: String,
    pub capabilities: Vec<CapabilityTag>,
    pub vehicle_class: VehicleClass,
}

impl DriverSeed {
    pub fn new(name: &str, capabilities: &[CapabilityTag], vehicle_class: VehicleClass) -> Self {
        Self {
            name: name.into(),
            capabilities: capabilities.to_vec(),
            vehicle_class,
        }
    }
}

impl Driver {
    pub(crate) fn from_seed(id: DriverId, seed: DriverSeed) -> Self {
        Self {
            id,
            name: seed.name,
            capabilities: seed.capabilities.into_iter().collect(),
            vehicle_class: seed.vehicle_class,
        }
    }

    pub fn covers(&self, needs: &[CapabilityTag]) -> bool {
        needs.iter().all(|tag| self.capabilities.contains(tag))
    }
}
