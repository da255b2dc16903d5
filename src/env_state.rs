//! # Tracker environment state
//!
//! This module defines [`crate::env_state::TrackerEnv`], the **shared environment object** handed to
//! the request handlers. It provides access to:
//!
//! - A persistent **HTTP client** with a global timeout and a User-Agent, shared by every
//!   outbound call.
//! - The URL of the upstream **OEM feed**.
//! - The **reverse geocoder** used to label ground positions.
//!
//! ## Structure
//!
//! ```text
//! TrackerEnv
//! ├── http_client (reqwest::Client)
//! ├── oem_url     (String)
//! └── geocoder    (Arc<dyn ReverseGeocoder>)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use iss_tracker::constants::{DEFAULT_GEOCODER_URL, DEFAULT_OEM_URL};
//! use iss_tracker::env_state::TrackerEnv;
//!
//! # async fn run() -> Result<(), iss_tracker::tracker_errors::TrackerError> {
//! let env = TrackerEnv::new(DEFAULT_OEM_URL, DEFAULT_GEOCODER_URL, Duration::from_secs(10))?;
//! let ephemeris = env.fetch_ephemeris().await?;
//! println!("{} state vectors", ephemeris.state_vectors.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Notes
//!
//! - A fetch never touches the epoch store: the caller decides whether to load the result, so a
//!   failed download or parse leaves the previous data set in place.
//! - The client is cheap to clone (reference counted), cloning the environment shares it.

use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    geocoding::{NominatimGeocoder, ReverseGeocoder},
    oem::{oem_reader::parse_oem, Ephemeris},
    tracker_errors::{TrackerError, TrackerResult},
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct TrackerEnv {
    http_client: reqwest::Client,
    oem_url: String,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl Debug for TrackerEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerEnv")
            .field("oem_url", &self.oem_url)
            .finish_non_exhaustive()
    }
}

impl TrackerEnv {
    /// Create a new environment backed by a Nominatim geocoder.
    ///
    /// Arguments
    /// ---------
    /// * `oem_url`: URL of the OEM XML document
    /// * `geocoder_url`: URL of the Nominatim `/reverse` endpoint
    /// * `timeout`: global timeout applied to every outbound request
    ///
    /// Return
    /// ------
    /// * the environment, or [`TrackerError::UpstreamRequest`] if the HTTP client cannot be built
    pub fn new(oem_url: &str, geocoder_url: &str, timeout: Duration) -> TrackerResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let geocoder = NominatimGeocoder::new(http_client.clone(), geocoder_url);
        Ok(TrackerEnv::with_geocoder(
            http_client,
            oem_url,
            Arc::new(geocoder),
        ))
    }

    /// Create an environment around an existing client and an arbitrary geocoder.
    pub fn with_geocoder(
        http_client: reqwest::Client,
        oem_url: &str,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        TrackerEnv {
            http_client,
            oem_url: oem_url.to_string(),
            geocoder,
        }
    }

    pub fn geocoder(&self) -> &dyn ReverseGeocoder {
        self.geocoder.as_ref()
    }

    /// Download the raw OEM document.
    ///
    /// Non-success statuses are reported as [`TrackerError::UpstreamStatus`].
    pub async fn fetch_oem(&self) -> TrackerResult<String> {
        tracing::info!(url = %self.oem_url, "fetching OEM data");

        let response = self.http_client.get(&self.oem_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Download and parse the OEM document.
    pub async fn fetch_ephemeris(&self) -> TrackerResult<Ephemeris> {
        let xml = self.fetch_oem().await?;
        let ephemeris = parse_oem(&xml)?;
        tracing::info!(
            state_vectors = ephemeris.state_vectors.len(),
            object = %ephemeris.metadata.object_name,
            "OEM data parsed"
        );
        Ok(ephemeris)
    }
}
