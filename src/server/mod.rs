mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::server::handlers::{drivers, prices, quotes, trips};
use crate::{
    api::{DynAPI, API},
    auth::DynIdentity,
    error::{unexpected_error, Error},
};

pub fn router(api: DynAPI, identity: DynIdentity) -> Router {
    Router::new()
        .route("/drivers", get(drivers::find))
        .route("/quotes", post(quotes::create))
        .route("/trips", post(trips::create).get(trips::history))
        .route("/prices", get(prices::list))
        .layer(Extension(api))
        .layer(Extension(identity))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    identity: DynIdentity,
    addr: SocketAddr,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api, identity);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(?err, "server stopped");
            unexpected_error()
        })
}
