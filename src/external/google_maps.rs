use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{upstream_error, Error},
    external::geocoding::Geocoder,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
}

/// Resolves addresses through the Google Geocoding API.
#[derive(Clone, Debug)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("https://{}/maps/api/geocode/json", self.api_base)
    }
}

/// Any non-200 reply is our request or Google's fault, never the rider's
/// address; unknown addresses come back as `ZERO_RESULTS`.
fn check_status(status_code: u16) -> Result<(), Error> {
    if status_code != 200 {
        tracing::warn!(status_code, "geocoding request failed");
        return Err(upstream_error());
    }

    Ok(())
}

/// Maps a decoded geocoding reply to the first match, if any.
fn first_location(data: Response<Vec<Place>>) -> Result<Option<Coordinates>, Error> {
    match data.status.as_str() {
        "OK" => Ok(data
            .results
            .and_then(|places| places.into_iter().next())
            .map(|place| place.geometry.location)),
        "ZERO_RESULTS" => Ok(None),
        status => {
            tracing::warn!(status, "geocoding request rejected");
            Err(upstream_error())
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        if address.trim().is_empty() {
            return Ok(None);
        }

        let res = self
            .client
            .get(self.url())
            .query(&[("key", self.api_key.as_str())])
            .query(&[("address", address)])
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        let data: Response<Vec<Place>> = res.json().await?;

        first_location(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Option<Coordinates>, Error> {
        first_location(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn ok_reply_takes_first_result() {
        let found = decode(
            r#"{
                "status": "OK",
                "results": [
                    {"formatted_address": "Rua A, 123", "geometry": {"location": {"lat": -26.9155, "lng": -49.0713}}},
                    {"formatted_address": "Rua A, 132", "geometry": {"location": {"lat": -26.0, "lng": -49.0}}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(found, Some(Coordinates::new(-26.9155, -49.0713)));
    }

    #[test]
    fn zero_results_is_unresolved_not_failure() {
        assert_eq!(decode(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap(), None);
    }

    #[test]
    fn api_base_is_a_bare_host() {
        let geocoder = GoogleGeocoder::new("maps.googleapis.com".into(), "key".into());

        assert_eq!(geocoder.url(), "https://maps.googleapis.com/maps/api/geocode/json");
    }

    #[test]
    fn http_failures_are_retryable_collaborator_errors() {
        assert!(check_status(200).is_ok());

        for status_code in [400, 403, 429, 500, 503] {
            let err = check_status(status_code).unwrap_err();
            assert!(err.is_collaborator_failure(), "{}", status_code);
            assert!(!err.is_validation_error(), "{}", status_code);
        }
    }

    #[test]
    fn denied_reply_is_upstream_failure() {
        let err = decode(r#"{"status": "REQUEST_DENIED"}"#).unwrap_err();
        assert!(err.is_collaborator_failure());
    }
}
