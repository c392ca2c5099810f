use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::capability::dedup_needs;
use crate::entities::{CapabilityTag, Coordinates};
use crate::error::{empty_needs_error, unresolved_address_error, Error};

/// A validated request: needs are non-empty and both endpoints resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub requester_id: String,
    pub needs: Vec<CapabilityTag>,
    pub origin: Coordinates,
    pub destination: Coordinates,
}

impl TripRequest {
    pub fn new(
        requester_id: String,
        needs: Vec<CapabilityTag>,
        origin: Option<Coordinates>,
        destination: Option<Coordinates>,
    ) -> Result<Self, Error> {
        let needs = dedup_needs(needs);

        if needs.is_empty() {
            return Err(empty_needs_error());
        }

        let origin = origin.ok_or_else(unresolved_address_error)?;
        let destination = destination.ok_or_else(unresolved_address_error)?;

        Ok(Self {
            requester_id,
            needs,
            origin,
            destination,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Requested,
    Finalized,
    Cancelled,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Requested => "requested".into(),
            Self::Finalized => "finalized".into(),
            Self::Cancelled => "cancelled".into(),
        }
    }
}

/// Persisted outcome of a confirmed trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: Uuid,
    pub requester_id: String,
    pub driver_name: String,
    pub needs: Vec<CapabilityTag>,
    pub status: Status,
    pub timestamp: DateTime<Utc>,
}

impl TripRecord {
    pub fn finalized(requester_id: String, driver_name: String, needs: Vec<CapabilityTag>) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id,
            driver_name,
            needs,
            status: Status::Finalized,
            timestamp: Utc::now(),
        }
    }

    /// Needs rendered the way the history table shows them.
    pub fn needs_labels(&self) -> Vec<String> {
        self.needs.iter().map(|tag| tag.label().to_string()).collect()
    }
}
