use super::Engine;

use async_trait::async_trait;

use crate::{api::HistoryAPI, auth::Requester, entities::TripRecord, error::Error};

#[async_trait]
impl HistoryAPI for Engine {
    #[tracing::instrument(skip_all, fields(requester = %requester.id))]
    async fn history(&self, requester: &Requester) -> Result<Vec<TripRecord>, Error> {
        let records = self.store.fetch_history(&requester.id).await?;

        tracing::info!(trips = records.len(), "fetched trip history");

        Ok(records)
    }
}
