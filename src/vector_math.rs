use nalgebra::Vector3;

use crate::constants::{Kilometer, KmPerSecond};

/// Instantaneous speed from a velocity vector given in km/s.
///
/// The Euclidean norm `sqrt(vx² + vy² + vz²)`; a zero vector yields `0.0`.
pub fn speed(velocity: &Vector3<f64>) -> KmPerSecond {
    velocity.norm()
}

/// Euclidean distance between two positions expressed in kilometers.
pub fn distance(a: &Vector3<f64>, b: &Vector3<f64>) -> Kilometer {
    (a - b).norm()
}
