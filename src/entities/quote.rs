use serde::{Deserialize, Serialize};

use crate::entities::{DriverId, VehicleClass};

/// A computed, not yet committed price for one driver and request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub driver_id: DriverId,
    pub driver_name: String,
    pub distance_km: f64,
    pub duration_min: u32,
    pub vehicle_class: VehicleClass,
    pub surcharge_total: f64,
    pub price_total: f64,
}
