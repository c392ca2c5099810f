use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::engine::matcher::MatchResult;
use crate::entities::capability::parse_needs;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    pub needs: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<Json<MatchResult>, Error> {
    let needs = parse_needs(&params.needs)?;
    let result = api.match_drivers(&needs)?;

    Ok(result.into())
}
