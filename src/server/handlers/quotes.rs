use axum::extract::{Extension, Json};

use super::{quoted_transaction, TripParams};
use crate::api::DynAPI;
use crate::auth::DynIdentity;
use crate::entities::Quote;
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(identity): Extension<DynIdentity>,
    Json(params): Json<TripParams>,
) -> Result<Json<Option<Quote>>, Error> {
    let requester = identity.current_requester();
    let tx = quoted_transaction(&api, &requester, &params).await?;

    Ok(tx.and_then(|tx| tx.quote().cloned()).into())
}
