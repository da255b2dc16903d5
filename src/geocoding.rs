//! # Reverse geocoding
//!
//! Resolves a latitude/longitude pair into a human readable place. The lookup sits behind the
//! [`ReverseGeocoder`] trait so the epoch store does not depend on a particular provider;
//! [`NominatimGeocoder`] talks to any service exposing the Nominatim `/reverse` API.
//!
//! Points that no provider can resolve (typically open ocean) are not errors: they come back as
//! [`GeoDescriptor::Unknown`]. Transport failures and unexpected payloads are reported as
//! [`TrackerError::Geocoding`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    constants::Degree,
    tracker_errors::{TrackerError, TrackerResult},
};

/// A resolved place, e.g. `{"display_name": "Tarfaya, Morocco", "address": {"country": "Morocco"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    #[serde(default)]
    pub address: BTreeMap<String, serde_json::Value>,
}

/// Outcome of a reverse geocoding lookup, rendered as the place object or the string `"unknown"`.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoDescriptor {
    Place(Place),
    Unknown,
}

impl Serialize for GeoDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            GeoDescriptor::Place(place) => place.serialize(serializer),
            GeoDescriptor::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve the place below the given coordinates (degrees).
    async fn reverse(&self, latitude: Degree, longitude: Degree) -> TrackerResult<GeoDescriptor>;
}

/// Nominatim answers either a place or `{"error": "Unable to geocode"}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NominatimResponse {
    Error { error: String },
    Place(Place),
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http_client: reqwest::Client,
    url: String,
}

impl NominatimGeocoder {
    /// Arguments
    /// ---------
    /// * `http_client`: shared client, expected to carry a timeout and a User-Agent
    /// * `url`: full URL of the `/reverse` endpoint
    pub fn new(http_client: reqwest::Client, url: impl Into<String>) -> Self {
        NominatimGeocoder {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, latitude: Degree, longitude: Degree) -> TrackerResult<GeoDescriptor> {
        let response = self
            .http_client
            .get(&self.url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await
            .map_err(|e| TrackerError::Geocoding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Geocoding(format!(
                "{} answered with status {}",
                self.url,
                status.as_u16()
            )));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Geocoding(e.to_string()))?;

        match body {
            NominatimResponse::Place(place) => Ok(GeoDescriptor::Place(place)),
            NominatimResponse::Error { error } => {
                tracing::debug!(latitude, longitude, error = %error, "no place below coordinates");
                Ok(GeoDescriptor::Unknown)
            }
        }
    }
}

#[cfg(test)]
mod geocoding_test {
    use super::*;

    #[test]
    fn test_geo_descriptor_json() {
        assert_eq!(
            serde_json::to_value(GeoDescriptor::Unknown).unwrap(),
            serde_json::json!("unknown")
        );

        let place = Place {
            display_name: "Kiruna, Norrbotten County, Sweden".into(),
            address: BTreeMap::from([
                ("country".to_string(), serde_json::json!("Sweden")),
                ("country_code".to_string(), serde_json::json!("se")),
            ]),
        };
        assert_eq!(
            serde_json::to_value(GeoDescriptor::Place(place)).unwrap(),
            serde_json::json!({
                "display_name": "Kiruna, Norrbotten County, Sweden",
                "address": {"country": "Sweden", "country_code": "se"}
            })
        );
    }

    #[test]
    fn test_nominatim_response() {
        let ocean: NominatimResponse =
            serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert!(matches!(ocean, NominatimResponse::Error { .. }));

        let land: NominatimResponse = serde_json::from_str(
            r#"{"place_id":1,"lat":"-23.7","lon":"133.8","display_name":"Alice Springs, Australia",
                "address":{"town":"Alice Springs","country":"Australia"}}"#,
        )
        .unwrap();
        match land {
            NominatimResponse::Place(place) => {
                assert_eq!(place.display_name, "Alice Springs, Australia");
                assert_eq!(place.address["country"], "Australia");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
