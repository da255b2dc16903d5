//! # ECI → geodetic conversion
//!
//! Converts an Earth-Centered-Inertial position (J2000 frame, kilometers) observed at a given
//! epoch into latitude, longitude and altitude above a **spherical** Earth.
//!
//! The Earth rotation between the J2000 reference instant and the requested epoch is modelled as
//! a linear rotation at the sidereal rate:
//!
//! ```text
//! θ(t) = θ(J2000) + ω⊕ · (t − J2000)
//! ```
//!
//! and the longitude is the right ascension of the position minus θ(t). This ignores precession,
//! nutation, polar motion and the Earth flattening, which is enough to place a ground track on a map
//! but not for geodetic-grade work.

use hifitime::Epoch;
use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    constants::{Degree, Kilometer, EARTH_MEAN_RADIUS, EARTH_ROTATION_RATE, RADEG, ROTATION_ANGLE_J2000},
    time::seconds_between,
};

/// Latitude / longitude / altitude triple on a spherical Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPosition {
    pub latitude: Degree,
    pub longitude: Degree,
    pub altitude: Kilometer,
}

/// Reference instant for the Earth rotation angle (J2000.0, taken on the UTC scale).
pub fn j2000_reference() -> Epoch {
    Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0)
}

/// Earth rotation angle at `epoch`, in degrees within [0, 360).
///
/// Arguments
/// ---------
/// * `epoch`: the instant at which the angle is evaluated
///
/// Return
/// ------
/// * the angle between the inertial x-axis and the Greenwich meridian
pub fn earth_rotation_angle(epoch: Epoch) -> Degree {
    let elapsed = seconds_between(j2000_reference(), epoch);
    (ROTATION_ANGLE_J2000 + EARTH_ROTATION_RATE * elapsed / RADEG).rem_euclid(360.0)
}

/// Wrap a longitude into the interval [-180, 180).
pub fn normalize_longitude(longitude: Degree) -> Degree {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Convert an ECI position into geodetic coordinates at the given epoch.
///
/// Arguments
/// ---------
/// * `position`: ECI position in kilometers
/// * `epoch`: the instant the position refers to
///
/// Return
/// ------
/// * a [`GeodeticPosition`] with latitude/longitude in degrees and altitude in kilometers above
///   the mean Earth radius
pub fn eci_to_geodetic(position: &Vector3<f64>, epoch: Epoch) -> GeodeticPosition {
    let (x, y, z) = (position.x, position.y, position.z);

    let latitude = z.atan2(x.hypot(y)) / RADEG;
    let right_ascension = y.atan2(x) / RADEG;
    let longitude = normalize_longitude(right_ascension - earth_rotation_angle(epoch));
    let altitude = position.norm() - EARTH_MEAN_RADIUS;

    GeodeticPosition {
        latitude,
        longitude,
        altitude,
    }
}
