use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{DriverId, Quote, TripRecord, TripRequest};
use crate::error::{
    driver_not_matched_error, invalid_input_error, invalid_state_error, Error,
};

/// One rider's way through matching, quoting and confirmation.
///
/// The transaction only records state; the engine computes matches and
/// quotes and hands them in. Every transition checks the current status and
/// leaves it untouched when it fails.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripTransaction {
    pub id: Uuid,
    pub requester_id: String,
    pub status: Status,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Idle,
    NeedsSelected {
        request: TripRequest,
    },
    Matched {
        request: TripRequest,
        candidates: Vec<DriverId>,
    },
    Unmatched {
        request: TripRequest,
    },
    DriverChosen {
        request: TripRequest,
        candidates: Vec<DriverId>,
        driver_id: DriverId,
    },
    Quoted {
        request: TripRequest,
        candidates: Vec<DriverId>,
        driver_id: DriverId,
        quote: Quote,
    },
    Confirmed {
        record: TripRecord,
    },
    Abandoned,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Idle => "idle".into(),
            Self::NeedsSelected { .. } => "needs_selected".into(),
            Self::Matched { .. } => "matched".into(),
            Self::Unmatched { .. } => "unmatched".into(),
            Self::DriverChosen { .. } => "driver_chosen".into(),
            Self::Quoted { .. } => "quoted".into(),
            Self::Confirmed { .. } => "confirmed".into(),
            Self::Abandoned => "abandoned".into(),
        }
    }
}

impl TripTransaction {
    pub fn new(requester_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id,
            status: Status::Idle,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            Status::Unmatched { .. } | Status::Confirmed { .. } | Status::Abandoned
        )
    }

    pub fn request(&self) -> Option<&TripRequest> {
        match &self.status {
            Status::NeedsSelected { request }
            | Status::Matched { request, .. }
            | Status::Unmatched { request }
            | Status::DriverChosen { request, .. }
            | Status::Quoted { request, .. } => Some(request),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[DriverId] {
        match &self.status {
            Status::Matched { candidates, .. }
            | Status::DriverChosen { candidates, .. }
            | Status::Quoted { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn chosen_driver(&self) -> Option<DriverId> {
        match &self.status {
            Status::DriverChosen { driver_id, .. } | Status::Quoted { driver_id, .. } => {
                Some(*driver_id)
            }
            _ => None,
        }
    }

    pub fn quote(&self) -> Option<&Quote> {
        match &self.status {
            Status::Quoted { quote, .. } => Some(quote),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&TripRecord> {
        match &self.status {
            Status::Confirmed { record } => Some(record),
            _ => None,
        }
    }

    #[tracing::instrument(skip_all, fields(transaction = %self.id))]
    pub fn select_needs(&mut self, request: TripRequest) -> Result<(), Error> {
        match self.status {
            Status::Idle => {
                self.status = Status::NeedsSelected { request };
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    /// An empty candidate list ends the transaction as `Unmatched`.
    #[tracing::instrument(skip_all, fields(transaction = %self.id))]
    pub fn record_matches(&mut self, candidates: Vec<DriverId>) -> Result<(), Error> {
        match &self.status {
            Status::NeedsSelected { request } => {
                let request = request.clone();

                self.status = if candidates.is_empty() {
                    Status::Unmatched { request }
                } else {
                    Status::Matched {
                        request,
                        candidates,
                    }
                };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    /// The rider may switch to another matched driver until the trip is
    /// confirmed; switching drops any earlier quote.
    #[tracing::instrument(skip_all, fields(transaction = %self.id, driver = %driver_id))]
    pub fn choose_driver(&mut self, driver_id: DriverId) -> Result<(), Error> {
        match &self.status {
            Status::Matched {
                request,
                candidates,
            }
            | Status::DriverChosen {
                request,
                candidates,
                ..
            }
            | Status::Quoted {
                request,
                candidates,
                ..
            } => {
                if !candidates.contains(&driver_id) {
                    return Err(driver_not_matched_error());
                }

                self.status = Status::DriverChosen {
                    request: request.clone(),
                    candidates: candidates.clone(),
                    driver_id,
                };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip_all, fields(transaction = %self.id))]
    pub fn record_quote(&mut self, quote: Quote) -> Result<(), Error> {
        match &self.status {
            Status::DriverChosen {
                request,
                candidates,
                driver_id,
            }
            | Status::Quoted {
                request,
                candidates,
                driver_id,
                ..
            } => {
                if quote.driver_id != *driver_id {
                    return Err(invalid_input_error());
                }

                self.status = Status::Quoted {
                    request: request.clone(),
                    candidates: candidates.clone(),
                    driver_id: *driver_id,
                    quote,
                };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip_all, fields(transaction = %self.id))]
    pub fn confirm(&mut self, record: TripRecord) -> Result<(), Error> {
        match self.status {
            Status::Quoted { .. } => {
                self.status = Status::Confirmed { record };
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip_all, fields(transaction = %self.id))]
    pub fn abandon(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Confirmed { .. } | Status::Abandoned => Err(invalid_state_error()),
            _ => {
                self.status = Status::Abandoned;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CapabilityTag, Coordinates, VehicleClass};

    fn request() -> TripRequest {
        TripRequest::new(
            "ana".into(),
            vec![CapabilityTag::Ramp],
            Some(Coordinates::new(-26.9155, -49.0713)),
            Some(Coordinates::new(-26.9108, -49.0703)),
        )
        .unwrap()
    }

    fn quote_for(driver_id: DriverId) -> Quote {
        Quote {
            driver_id,
            driver_name: "João".into(),
            distance_km: 5.2,
            duration_min: 10,
            vehicle_class: VehicleClass::Standard,
            surcharge_total: 2.0,
            price_total: 15.78,
        }
    }

    fn quoted() -> TripTransaction {
        let mut tx = TripTransaction::new("ana".into());
        tx.select_needs(request()).unwrap();
        tx.record_matches(vec![DriverId(0), DriverId(2)]).unwrap();
        tx.choose_driver(DriverId(0)).unwrap();
        tx.record_quote(quote_for(DriverId(0))).unwrap();
        tx
    }

    #[test]
    fn happy_path_reaches_confirmed() {
        let mut tx = quoted();
        assert_eq!(tx.status.name(), "quoted");
        assert_eq!(tx.quote().unwrap().price_total, 15.78);

        let record = TripRecord::finalized("ana".into(), "João".into(), vec![CapabilityTag::Ramp]);
        tx.confirm(record.clone()).unwrap();

        assert_eq!(tx.record(), Some(&record));
        assert!(tx.is_terminal());
    }

    #[test]
    fn no_candidates_is_terminal_unmatched() {
        let mut tx = TripTransaction::new("ana".into());
        tx.select_needs(request()).unwrap();
        tx.record_matches(vec![]).unwrap();

        assert_eq!(tx.status.name(), "unmatched");
        assert!(tx.is_terminal());
        assert!(tx.choose_driver(DriverId(0)).unwrap_err().is_invalid_state_error());
    }

    #[test]
    fn choosing_unmatched_driver_leaves_state_alone() {
        let mut tx = TripTransaction::new("ana".into());
        tx.select_needs(request()).unwrap();
        tx.record_matches(vec![DriverId(0)]).unwrap();

        let before = tx.status.clone();
        let err = tx.choose_driver(DriverId(7)).unwrap_err();

        assert!(err.is_driver_not_matched_error());
        assert_eq!(tx.status, before);
    }

    #[test]
    fn switching_driver_drops_quote() {
        let mut tx = quoted();
        tx.choose_driver(DriverId(2)).unwrap();

        assert_eq!(tx.chosen_driver(), Some(DriverId(2)));
        assert!(tx.quote().is_none());
        assert!(tx
            .record_quote(quote_for(DriverId(0)))
            .unwrap_err()
            .is_invalid_input_error());
    }

    #[test]
    fn confirm_requires_quote() {
        let mut tx = TripTransaction::new("ana".into());
        tx.select_needs(request()).unwrap();
        tx.record_matches(vec![DriverId(0)]).unwrap();
        tx.choose_driver(DriverId(0)).unwrap();

        let record = TripRecord::finalized("ana".into(), "João".into(), vec![CapabilityTag::Ramp]);
        assert!(tx.confirm(record).unwrap_err().is_invalid_state_error());
        assert_eq!(tx.status.name(), "driver_chosen");
    }

    #[test]
    fn abandon_from_any_open_state() {
        let mut idle = TripTransaction::new("ana".into());
        idle.abandon().unwrap();
        assert_eq!(idle.status, Status::Abandoned);
        assert!(idle.abandon().unwrap_err().is_invalid_state_error());

        let mut tx = quoted();
        tx.abandon().unwrap();
        assert!(tx.quote().is_none());
        assert!(tx.record().is_none());
    }

    #[test]
    fn needs_can_only_be_selected_once() {
        let mut tx = TripTransaction::new("ana".into());
        tx.select_needs(request()).unwrap();
        assert!(tx.select_needs(request()).unwrap_err().is_invalid_state_error());
    }
}
