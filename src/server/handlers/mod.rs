pub mod drivers;
pub mod prices;
pub mod quotes;
pub mod trips;

use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::auth::Requester;
use crate::engine::matcher::MatchResult;
use crate::entities::{CapabilityTag, DriverId, TripTransaction};
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripParams {
    pub needs: Vec<CapabilityTag>,
    pub origin: String,
    pub destination: String,
    pub driver_id: DriverId,
}

/// Runs a transaction up to `Quoted`. `None` means no driver covers the needs.
async fn quoted_transaction(
    api: &DynAPI,
    requester: &Requester,
    params: &TripParams,
) -> Result<Option<TripTransaction>, Error> {
    let origin = api.resolve_address(&params.origin).await?;
    let destination = api.resolve_address(&params.destination).await?;

    let mut tx = api.begin_trip(requester);
    api.select_needs(&mut tx, params.needs.clone(), origin, destination)?;

    if let MatchResult::NoneFound = api.find_drivers(&mut tx)? {
        return Ok(None);
    }

    api.choose_driver(&mut tx, params.driver_id)?;
    api.quote(&mut tx)?;

    Ok(Some(tx))
}
