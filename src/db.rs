use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use tokio::sync::Mutex;

use crate::entities::TripRecord;
use crate::error::Error;

/// Durable home of confirmed trips.
#[async_trait]
pub trait TripStore {
    async fn record_trip(&self, record: &TripRecord) -> Result<(), Error>;

    /// Most recent first.
    async fn fetch_history(&self, requester_id: &str) -> Result<Vec<TripRecord>, Error>;
}

pub type DynTripStore = Arc<dyn TripStore + Send + Sync>;

pub struct PgPool(pub Pool<Postgres>);

impl PgPool {
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Ok(Self(pool))
    }
}

#[derive(Debug)]
pub struct PgTripStore {
    pool: Pool<Postgres>,
}

impl PgTripStore {
    #[tracing::instrument(name = "PgTripStore::new", skip_all)]
    pub async fn new(pool: Pool<Postgres>) -> Result<Self, Error> {
        pool.execute("CREATE TABLE IF NOT EXISTS trip_records (id UUID PRIMARY KEY, requester_id VARCHAR NOT NULL, status VARCHAR NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS trip_records_requester ON trip_records (requester_id, created_at DESC)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TripStore for PgTripStore {
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    async fn record_trip(&self, record: &TripRecord) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO trip_records (id, requester_id, status, created_at, data) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&record.id)
            .bind(&record.requester_id)
            .bind(record.status.name())
            .bind(&record.timestamp)
            .bind(Json(record)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_history(&self, requester_id: &str) -> Result<Vec<TripRecord>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(
            sqlx::query(
                "SELECT data FROM trip_records WHERE requester_id = $1 ORDER BY created_at DESC",
            )
            .bind(requester_id),
        );

        let mut records = vec![];

        while let Some(row) = rows.try_next().await? {
            let Json(record): Json<TripRecord> = row.try_get("data")?;
            records.push(record);
        }

        Ok(records)
    }
}

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    records: Mutex<Vec<TripRecord>>,
}

#[async_trait]
impl TripStore for MemoryTripStore {
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    async fn record_trip(&self, record: &TripRecord) -> Result<(), Error> {
        self.records.lock().await.push(record.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_history(&self, requester_id: &str) -> Result<Vec<TripRecord>, Error> {
        let records = self.records.lock().await;

        // newest insert wins a timestamp tie
        let mut history: Vec<TripRecord> = records
            .iter()
            .rev()
            .filter(|record| record.requester_id == requester_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CapabilityTag;
    use chrono::{Duration, Utc};
    use tokio_test::block_on;

    fn record(requester_id: &str, driver_name: &str, minutes_ago: i64) -> TripRecord {
        let mut record = TripRecord::finalized(
            requester_id.into(),
            driver_name.into(),
            vec![CapabilityTag::Ramp],
        );
        record.timestamp = Utc::now() - Duration::minutes(minutes_ago);
        record
    }

    #[test]
    fn memory_history_is_filtered_and_newest_first() {
        let store = MemoryTripStore::default();

        block_on(async {
            store.record_trip(&record("ana", "Pedro", 30)).await.unwrap();
            store.record_trip(&record("bruno", "Maria", 20)).await.unwrap();
            store.record_trip(&record("ana", "João", 5)).await.unwrap();
            store.record_trip(&record("ana", "Carlos", 60)).await.unwrap();
        });

        let history = block_on(store.fetch_history("ana")).unwrap();
        let drivers: Vec<_> = history.iter().map(|r| r.driver_name.as_str()).collect();

        assert_eq!(drivers, vec!["João", "Pedro", "Carlos"]);
        assert!(block_on(store.fetch_history("nobody")).unwrap().is_empty());
    }
}
