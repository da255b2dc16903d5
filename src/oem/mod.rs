//! # Orbit Ephemeris Message (OEM) data model
//!
//! Typed representation of one CCSDS OEM data set as published for the ISS:
//!
//! ```text
//! Ephemeris
//! ├── header        (EphemerisHeader: CREATION_DATE, ORIGINATOR)
//! ├── metadata      (EphemerisMetadata: OBJECT_NAME, OBJECT_ID, CENTER_NAME, ...)
//! ├── comments      (ordered, blank entries kept as `None`)
//! └── state_vectors (StateVector: EPOCH, X, Y, Z, X_DOT, Y_DOT, Z_DOT)
//! ```
//!
//! Header and metadata keep the OEM keyword names both when read from XML and when rendered as
//! JSON, so a loaded data set reads back unmodified. State vectors parse their epoch once at
//! construction; positions are in kilometers and velocities in km/s.
//!
//! The XML reader lives in [`oem_reader`].

pub mod oem_reader;

use hifitime::Epoch;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize, Serializer};

use crate::{measurement::Measurement, time::parse_oem_epoch, tracker_errors::TrackerResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisHeader {
    #[serde(rename = "CREATION_DATE")]
    pub creation_date: String,
    #[serde(rename = "ORIGINATOR")]
    pub originator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisMetadata {
    #[serde(rename = "OBJECT_NAME")]
    pub object_name: String,
    #[serde(rename = "OBJECT_ID")]
    pub object_id: String,
    #[serde(rename = "CENTER_NAME")]
    pub center_name: String,
    #[serde(rename = "REF_FRAME")]
    pub ref_frame: String,
    #[serde(rename = "TIME_SYSTEM")]
    pub time_system: String,
    #[serde(rename = "START_TIME")]
    pub start_time: String,
    #[serde(rename = "STOP_TIME")]
    pub stop_time: String,
}

/// Position and velocity of the object at one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    epoch: String,
    instant: Epoch,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
}

impl StateVector {
    /// Build a state vector, parsing its OEM epoch string.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: OEM timestamp in day-of-year format, e.g. `2023-063T12:00:00.000Z`
    /// * `position`: ECI position in km
    /// * `velocity`: ECI velocity in km/s
    ///
    /// Return
    /// ------
    /// * the state vector, or [`crate::tracker_errors::TrackerError::InvalidEpoch`]
    pub fn new(epoch: &str, position: Vector3<f64>, velocity: Vector3<f64>) -> TrackerResult<Self> {
        Ok(StateVector {
            epoch: epoch.to_string(),
            instant: parse_oem_epoch(epoch)?,
            position,
            velocity,
        })
    }

    /// The epoch exactly as it appears in the data set
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn instant(&self) -> Epoch {
        self.instant
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }
}

#[derive(Serialize)]
struct StateVectorRecord<'a> {
    #[serde(rename = "EPOCH")]
    epoch: &'a str,
    #[serde(rename = "X")]
    x: Measurement,
    #[serde(rename = "Y")]
    y: Measurement,
    #[serde(rename = "Z")]
    z: Measurement,
    #[serde(rename = "X_DOT")]
    x_dot: Measurement,
    #[serde(rename = "Y_DOT")]
    y_dot: Measurement,
    #[serde(rename = "Z_DOT")]
    z_dot: Measurement,
}

impl Serialize for StateVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        StateVectorRecord {
            epoch: &self.epoch,
            x: Measurement::km(self.position.x),
            y: Measurement::km(self.position.y),
            z: Measurement::km(self.position.z),
            x_dot: Measurement::km_per_s(self.velocity.x),
            y_dot: Measurement::km_per_s(self.velocity.y),
            z_dot: Measurement::km_per_s(self.velocity.z),
        }
        .serialize(serializer)
    }
}

/// One complete OEM data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ephemeris {
    pub header: EphemerisHeader,
    pub metadata: EphemerisMetadata,
    pub comments: Vec<Option<String>>,
    pub state_vectors: Vec<StateVector>,
}

impl Ephemeris {
    /// Exact-match lookup on the epoch string
    pub fn find(&self, epoch: &str) -> Option<&StateVector> {
        self.state_vectors.iter().find(|sv| sv.epoch == epoch)
    }
}
