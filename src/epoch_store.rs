//! # Epoch store
//!
//! Process-wide cache holding the last loaded OEM data set, together with the read-only queries
//! served over HTTP.
//!
//! ## Lifecycle
//!
//! ```text
//!            load                load (replace)
//!   EMPTY ───────────▶ LOADED ◀───────────────┐
//!     ▲                  │  └─────────────────┘
//!     └──── clear ───────┘
//! ```
//!
//! `clear` on an EMPTY store is rejected with [`TrackerError::EmptyStore`], and so is every read.
//!
//! ## Concurrency
//!
//! The data set lives behind a single [`RwLock`] as an `Arc<Ephemeris>`. Writers swap the whole
//! `Arc`; readers clone it and release the lock at once, so a query always observes one complete
//! data set and no lock is held while a geocoding request is in flight.
//!
//! ## Queries
//!
//! | operation | result |
//! |---|---|
//! | [`EpochStore::list_epochs`] | epoch strings within an [`EpochWindow`] |
//! | [`EpochStore::state_vector`] | exact epoch match |
//! | [`EpochStore::speed`] | norm of the velocity, km/s |
//! | [`EpochStore::location`] | latitude, longitude, altitude and place below the object |
//! | [`EpochStore::now`] | the state vector closest to a given instant, with its location and speed |

use std::sync::{Arc, PoisonError, RwLock};

use hifitime::Epoch;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::{Degree, Seconds},
    conversion::eci_to_geodetic,
    geocoding::{GeoDescriptor, ReverseGeocoder},
    measurement::Measurement,
    oem::{oem_reader::parse_oem, Ephemeris, EphemerisHeader, EphemerisMetadata, StateVector},
    time::seconds_between,
    tracker_errors::{TrackerError, TrackerResult},
    vector_math,
};

/// `[offset, offset + limit)` slice of the epoch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EpochWindow {
    offset: usize,
    limit: Option<usize>,
}

impl EpochWindow {
    /// A window starting at `offset`; `None` for `limit` keeps everything after the offset.
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        EpochWindow { offset, limit }
    }

    /// Build a window from raw query string values.
    ///
    /// Arguments
    /// ---------
    /// * `offset`: optional non-negative integer, defaults to 0
    /// * `limit`: optional positive integer, defaults to "all remaining"
    ///
    /// Return
    /// ------
    /// * [`TrackerError::InvalidParameter`] if a value is not an integer
    /// * [`TrackerError::ParameterOutOfRange`] if `offset` is negative or `limit` is not positive
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> TrackerResult<Self> {
        let offset = match offset {
            Some(raw) => parse_bounded("offset", raw, 0)?,
            None => 0,
        };
        let limit = limit.map(|raw| parse_bounded("limit", raw, 1)).transpose()?;

        Ok(EpochWindow { offset, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Apply the window to a slice, clamping both ends to its length.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = self
            .limit
            .map_or(items.len(), |limit| start.saturating_add(limit).min(items.len()));
        &items[start..end]
    }
}

fn parse_bounded(name: &'static str, raw: &str, min: i64) -> TrackerResult<usize> {
    let value: i64 = match raw.parse() {
        Ok(value) => value,
        // an integer that does not fit is out of range, not malformed
        Err(_) if is_integer_literal(raw) => {
            return Err(TrackerError::ParameterOutOfRange {
                name,
                value: raw.to_string(),
            })
        }
        Err(_) => {
            return Err(TrackerError::InvalidParameter {
                name,
                value: raw.to_string(),
            })
        }
    };

    if value < min {
        return Err(TrackerError::ParameterOutOfRange {
            name,
            value: raw.to_string(),
        });
    }

    usize::try_from(value).map_err(|_| TrackerError::ParameterOutOfRange {
        name,
        value: raw.to_string(),
    })
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Ground position of the object at one epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub altitude: Measurement,
    pub geo: GeoDescriptor,
    pub latitude: Degree,
    pub longitude: Degree,
}

/// Answer of [`EpochStore::now`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowReport {
    pub closest_epoch: String,
    pub location: Location,
    /// Signed distance from the query instant to the epoch, positive when the epoch is ahead
    pub seconds_from_now: Seconds,
    pub speed: Measurement,
}

/// The state vector whose epoch is nearest to `instant`.
///
/// On ties the earliest one in slice order wins. Return `None` for an empty slice.
pub fn closest_state_vector(state_vectors: &[StateVector], instant: Epoch) -> Option<&StateVector> {
    state_vectors
        .iter()
        .position_min_by(|a, b| {
            let da = seconds_between(instant, a.instant()).abs();
            let db = seconds_between(instant, b.instant()).abs();
            da.total_cmp(&db)
        })
        .map(|idx| &state_vectors[idx])
}

#[derive(Debug, Default)]
pub struct EpochStore {
    data: RwLock<Option<Arc<Ephemeris>>>,
}

impl EpochStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole content of the store and return the new snapshot.
    pub fn load(&self, ephemeris: Ephemeris) -> Arc<Ephemeris> {
        let snapshot = Arc::new(ephemeris);
        let previous = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&snapshot));

        tracing::info!(
            state_vectors = snapshot.state_vectors.len(),
            replaced = previous.is_some(),
            "epoch store loaded"
        );
        snapshot
    }

    /// Parse an OEM document and load it. The store is untouched if parsing fails.
    pub fn load_xml(&self, xml: &str) -> TrackerResult<Arc<Ephemeris>> {
        let ephemeris = parse_oem(xml)?;
        Ok(self.load(ephemeris))
    }

    /// Drop the loaded data set.
    ///
    /// Return [`TrackerError::EmptyStore`] when there is nothing to delete.
    pub fn clear(&self) -> TrackerResult<()> {
        let previous = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match previous {
            Some(_) => {
                tracing::info!("epoch store cleared");
                Ok(())
            }
            None => Err(TrackerError::EmptyStore),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The complete loaded data set.
    pub fn snapshot(&self) -> TrackerResult<Arc<Ephemeris>> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TrackerError::EmptyStore)
    }

    pub fn header(&self) -> TrackerResult<EphemerisHeader> {
        Ok(self.snapshot()?.header.clone())
    }

    pub fn metadata(&self) -> TrackerResult<EphemerisMetadata> {
        Ok(self.snapshot()?.metadata.clone())
    }

    pub fn comments(&self) -> TrackerResult<Vec<Option<String>>> {
        Ok(self.snapshot()?.comments.clone())
    }

    /// Epoch strings in store order, restricted to `window`.
    ///
    /// An offset past the end yields an empty list.
    pub fn list_epochs(&self, window: &EpochWindow) -> TrackerResult<Vec<String>> {
        let snapshot = self.snapshot()?;
        Ok(window
            .slice(&snapshot.state_vectors)
            .iter()
            .map(|sv| sv.epoch().to_string())
            .collect())
    }

    /// Exact-match lookup on the epoch string.
    pub fn state_vector(&self, epoch: &str) -> TrackerResult<StateVector> {
        self.snapshot()?
            .find(epoch)
            .cloned()
            .ok_or_else(|| TrackerError::EpochNotFound(epoch.to_string()))
    }

    /// Instantaneous speed at an epoch, in km/s.
    pub fn speed(&self, epoch: &str) -> TrackerResult<Measurement> {
        let sv = self.state_vector(epoch)?;
        Ok(Measurement::km_per_s(vector_math::speed(sv.velocity())))
    }

    /// Ground position and place below the object at an epoch.
    pub async fn location(
        &self,
        epoch: &str,
        geocoder: &dyn ReverseGeocoder,
    ) -> TrackerResult<Location> {
        let sv = self.state_vector(epoch)?;
        locate(&sv, geocoder).await
    }

    /// The state vector closest in time to `instant` (earliest on ties).
    pub fn closest_to(&self, instant: Epoch) -> TrackerResult<StateVector> {
        let snapshot = self.snapshot()?;
        closest_state_vector(&snapshot.state_vectors, instant)
            .cloned()
            .ok_or(TrackerError::EmptyStore)
    }

    /// Where the object is at `instant`, according to the nearest state vector.
    pub async fn now(
        &self,
        geocoder: &dyn ReverseGeocoder,
        instant: Epoch,
    ) -> TrackerResult<NowReport> {
        let sv = self.closest_to(instant)?;
        let location = locate(&sv, geocoder).await?;

        Ok(NowReport {
            closest_epoch: sv.epoch().to_string(),
            location,
            seconds_from_now: seconds_between(instant, sv.instant()),
            speed: Measurement::km_per_s(vector_math::speed(sv.velocity())),
        })
    }
}

async fn locate(sv: &StateVector, geocoder: &dyn ReverseGeocoder) -> TrackerResult<Location> {
    let geodetic = eci_to_geodetic(sv.position(), sv.instant());
    let geo = geocoder
        .reverse(geodetic.latitude, geodetic.longitude)
        .await?;

    Ok(Location {
        altitude: Measurement::km(geodetic.altitude),
        geo,
        latitude: geodetic.latitude,
        longitude: geodetic.longitude,
    })
}
