use serde::Serialize;

use crate::constants::{KM, KM_PER_S};

/// A scalar value tagged with its unit, rendered as `{"units": .., "value": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub units: &'static str,
    pub value: f64,
}

impl Measurement {
    pub fn km(value: f64) -> Self {
        Measurement { units: KM, value }
    }

    pub fn km_per_s(value: f64) -> Self {
        Measurement {
            units: KM_PER_S,
            value,
        }
    }
}
