use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::Coordinates;
use crate::error::Error;

/// Turns free-text addresses into coordinates.
#[async_trait]
pub trait Geocoder {
    /// `Ok(None)` when the address is unknown; `Err` when the service failed.
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error>;
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;

fn normalize(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lookup table of known places, for demos and tests.
#[derive(Clone, Debug, Default)]
pub struct FixedGeocoder {
    places: HashMap<String, Coordinates>,
}

impl FixedGeocoder {
    /// The pickup and drop-off points used by the demo map.
    pub fn demo() -> Self {
        Self::default()
            .with_place("Rua A, 123", Coordinates::new(-26.9155, -49.0713))
            .with_place("Av. B, 456", Coordinates::new(-26.9108, -49.0703))
    }

    pub fn with_place(mut self, address: &str, coordinates: Coordinates) -> Self {
        self.places.insert(normalize(address), coordinates);
        self
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        Ok(self.places.get(&normalize(address)).copied())
    }
}
