use std::sync::Arc;

use paratodos::auth::StaticIdentity;
use paratodos::config::Config;
use paratodos::db::{DynTripStore, MemoryTripStore, PgPool, PgTripStore};
use paratodos::engine::fare::FareCalculator;
use paratodos::engine::registry::DriverRegistry;
use paratodos::engine::Engine;
use paratodos::error::Error;
use paratodos::external::announcer::{Announcer, ChannelAnnouncer, TracingAnnouncer};
use paratodos::external::geocoding::{DynGeocoder, FixedGeocoder};
use paratodos::external::google_maps::GoogleGeocoder;
use paratodos::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let registry = match &config.driver_roster_path {
        Some(path) => DriverRegistry::load(path)?,
        None => DriverRegistry::seeded(),
    };

    let store: DynTripStore = match &config.database {
        Some(db) => {
            let PgPool(pool) = PgPool::new(&db.url, db.max_connections).await?;
            Arc::new(PgTripStore::new(pool).await?)
        }
        None => {
            tracing::info!("no DATABASE_URL, trip records stay in memory");
            Arc::new(MemoryTripStore::default())
        }
    };

    let geocoder: DynGeocoder = match &config.google_maps {
        Some(maps) => Arc::new(GoogleGeocoder::new(maps.api_base.clone(), maps.api_key.clone())),
        None => Arc::new(FixedGeocoder::demo()),
    };

    let mut engine = Engine::new(registry, FareCalculator::default(), store, geocoder);

    if config.announce {
        let (announcer, announcements) = ChannelAnnouncer::bounded(32);

        tokio::spawn(async move {
            let speaker = TracingAnnouncer;

            while let Ok(message) = announcements.recv().await {
                speaker.announce(&message).ok();
            }
        });

        engine = engine.with_announcer(Arc::new(announcer));
    }

    let identity = Arc::new(StaticIdentity::new(config.requester.clone()));

    serve(engine, identity, config.bind_addr).await
}
