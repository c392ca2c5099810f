use super::estimator;
use super::matcher::{find_matches, MatchResult};
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::TripAPI,
    auth::Requester,
    entities::{CapabilityTag, Coordinates, DriverId, Quote, TripRecord, TripRequest, TripTransaction},
    error::{invalid_input_error, invalid_state_error, Error},
};

#[async_trait]
impl TripAPI for Engine {
    fn begin_trip(&self, requester: &Requester) -> TripTransaction {
        let tx = TripTransaction::new(requester.id.clone());
        tracing::info!(transaction = %tx.id, requester = %requester.id, "trip transaction started");

        tx
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_address(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        let coordinates = self.geocoder.resolve(address).await?;

        if coordinates.is_none() {
            tracing::info!("address could not be resolved");
        }

        Ok(coordinates)
    }

    #[tracing::instrument(skip_all, fields(transaction = %tx.id))]
    fn select_needs(
        &self,
        tx: &mut TripTransaction,
        needs: Vec<CapabilityTag>,
        origin: Option<Coordinates>,
        destination: Option<Coordinates>,
    ) -> Result<(), Error> {
        let request = TripRequest::new(tx.requester_id.clone(), needs, origin, destination)
            .map_err(|err| {
                if err.is_empty_needs_error() {
                    self.announce("Por favor, selecione ao menos uma necessidade.");
                }
                err
            })?;

        tx.select_needs(request)
    }

    #[tracing::instrument(skip_all, fields(transaction = %tx.id))]
    fn find_drivers(&self, tx: &mut TripTransaction) -> Result<MatchResult, Error> {
        let needs = tx
            .request()
            .map(|request| request.needs.clone())
            .ok_or_else(invalid_state_error)?;

        let result = find_matches(&self.registry, &needs)?;
        let candidates: Vec<DriverId> = result.drivers().iter().map(|driver| driver.id).collect();

        tx.record_matches(candidates)?;

        match &result {
            MatchResult::Found(drivers) => {
                tracing::info!(matched = drivers.len(), "compatible drivers found");
                self.announce(&format!("{} motoristas encontrados.", drivers.len()));
            }
            MatchResult::NoneFound => {
                tracing::info!("no compatible driver");
                self.announce("Nenhum motorista compatível encontrado.");
            }
        }

        Ok(result)
    }

    #[tracing::instrument(skip_all, fields(transaction = %tx.id, driver = %driver_id))]
    fn choose_driver(&self, tx: &mut TripTransaction, driver_id: DriverId) -> Result<(), Error> {
        tx.choose_driver(driver_id)
    }

    /// Pure recomputation from the transaction's request and chosen driver;
    /// calling it again yields the same quote.
    #[tracing::instrument(skip_all, fields(transaction = %tx.id))]
    fn quote(&self, tx: &mut TripTransaction) -> Result<Quote, Error> {
        let driver_id = tx.chosen_driver().ok_or_else(invalid_state_error)?;
        let request = tx.request().ok_or_else(invalid_state_error)?;

        let driver = self.registry.get(driver_id).ok_or_else(|| {
            tracing::error!(driver = %driver_id, "chosen driver missing from registry");
            invalid_input_error()
        })?;

        let distance_km = estimator::distance_km(&request.origin, &request.destination);
        let duration_min = estimator::duration_min(distance_km);

        let quote = self
            .fares
            .quote(driver, distance_km, duration_min, &request.needs);

        tx.record_quote(quote.clone())?;

        tracing::info!(price_total = quote.price_total, "quote computed");

        Ok(quote)
    }

    /// Persists exactly one record. If the store fails the transaction stays
    /// quoted so the caller can retry.
    #[tracing::instrument(skip_all, fields(transaction = %tx.id))]
    async fn confirm(&self, tx: &mut TripTransaction) -> Result<TripRecord, Error> {
        let quote = tx.quote().ok_or_else(invalid_state_error)?;
        let needs = tx
            .request()
            .map(|request| request.needs.clone())
            .ok_or_else(invalid_state_error)?;

        let record = TripRecord::finalized(tx.requester_id.clone(), quote.driver_name.clone(), needs);

        self.store.record_trip(&record).await.map_err(|err| {
            tracing::warn!(?err, "failed to persist trip record");
            err
        })?;

        tx.confirm(record.clone())?;

        tracing::info!(
            record = %record.id,
            driver = %record.driver_name,
            needs = ?record.needs_labels(),
            "trip confirmed"
        );
        self.announce("Motorista chegou.");

        Ok(record)
    }

    #[tracing::instrument(skip_all, fields(transaction = %tx.id))]
    fn abandon(&self, tx: &mut TripTransaction) -> Result<(), Error> {
        let from = tx.status.name();
        tx.abandon()?;

        tracing::info!(from = %from, "trip transaction abandoned");

        Ok(())
    }
}
