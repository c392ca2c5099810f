use axum::extract::{Extension, Json};

use super::{quoted_transaction, TripParams};
use crate::api::DynAPI;
use crate::auth::DynIdentity;
use crate::entities::TripRecord;
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(identity): Extension<DynIdentity>,
    Json(params): Json<TripParams>,
) -> Result<Json<Option<TripRecord>>, Error> {
    let requester = identity.current_requester();

    let mut tx = match quoted_transaction(&api, &requester, &params).await? {
        Some(tx) => tx,
        None => return Ok(None.into()),
    };

    let record = api.confirm(&mut tx).await?;

    Ok(Some(record).into())
}

pub async fn history(
    Extension(api): Extension<DynAPI>,
    Extension(identity): Extension<DynIdentity>,
) -> Result<Json<Vec<TripRecord>>, Error> {
    let requester = identity.current_requester();
    let records = api.history(&requester).await?;

    Ok(records.into())
}
