use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::Requester;
use crate::engine::fare::PriceCatalogEntry;
use crate::engine::matcher::MatchResult;
use crate::entities::{CapabilityTag, Coordinates, DriverId, Quote, TripRecord, TripTransaction};
use crate::error::Error;

#[async_trait]
pub trait TripAPI {
    fn begin_trip(&self, requester: &Requester) -> TripTransaction;

    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinates>, Error>;

    fn select_needs(
        &self,
        tx: &mut TripTransaction,
        needs: Vec<CapabilityTag>,
        origin: Option<Coordinates>,
        destination: Option<Coordinates>,
    ) -> Result<(), Error>;

    fn find_drivers(&self, tx: &mut TripTransaction) -> Result<MatchResult, Error>;

    fn choose_driver(&self, tx: &mut TripTransaction, driver_id: DriverId) -> Result<(), Error>;

    fn quote(&self, tx: &mut TripTransaction) -> Result<Quote, Error>;

    async fn confirm(&self, tx: &mut TripTransaction) -> Result<TripRecord, Error>;

    fn abandon(&self, tx: &mut TripTransaction) -> Result<(), Error>;
}

#[async_trait]
pub trait HistoryAPI {
    async fn history(&self, requester: &Requester) -> Result<Vec<TripRecord>, Error>;
}

pub trait CatalogAPI {
    fn match_drivers(&self, needs: &[CapabilityTag]) -> Result<MatchResult, Error>;

    fn price_catalog(&self) -> Vec<PriceCatalogEntry>;
}

pub trait API: TripAPI + HistoryAPI + CatalogAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
