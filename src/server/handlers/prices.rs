use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::engine::fare::PriceCatalogEntry;

pub async fn list(Extension(api): Extension<DynAPI>) -> Json<Vec<PriceCatalogEntry>> {
    api.price_catalog().into()
}
