use super::fare::PriceCatalogEntry;
use super::matcher::{find_matches, MatchResult};
use super::Engine;

use crate::{api::CatalogAPI, entities::CapabilityTag, error::Error};

impl CatalogAPI for Engine {
    /// Stateless lookup for browsing drivers outside a trip transaction.
    #[tracing::instrument(skip(self))]
    fn match_drivers(&self, needs: &[CapabilityTag]) -> Result<MatchResult, Error> {
        find_matches(&self.registry, needs)
    }

    fn price_catalog(&self) -> Vec<PriceCatalogEntry> {
        self.fares.catalog()
    }
}
