//! # Constants and type definitions for the ISS tracker
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the crate, together with the default endpoints of the two external
//! collaborators (the NASA OEM feed and the reverse-geocoding service).
//!
//! ## Overview
//!
//! - Geophysical constants (mean Earth radius, sidereal rotation rate)
//! - Earth rotation angle at the J2000 reference instant
//! - Unit conversions (degrees ↔ radians)
//! - Unit labels rendered in responses
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Mean Earth radius in kilometers (IUGG)
pub const EARTH_MEAN_RADIUS: Kilometer = 6_371.0;

/// Sidereal rotation rate of the Earth in radians per SI second (IERS)
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_855_3e-5;

/// Greenwich mean sidereal angle at J2000.0 (2000-01-01 12:00:00 UT), in degrees
pub const ROTATION_ANGLE_J2000: Degree = 280.460_618_37;

// -------------------------------------------------------------------------------------------------
// Unit labels
// -------------------------------------------------------------------------------------------------

/// Unit label for positions and altitudes
pub const KM: &str = "km";

/// Unit label for velocities and speeds
pub const KM_PER_S: &str = "km/s";

// -------------------------------------------------------------------------------------------------
// External endpoints
// -------------------------------------------------------------------------------------------------

/// Public CCSDS OEM feed for the ISS, J2000 frame
pub const DEFAULT_OEM_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

/// Nominatim-compatible reverse geocoding endpoint
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KmPerSecond = f64;
/// Elapsed time in SI seconds
pub type Seconds = f64;
