pub mod config;
pub mod constants;
pub mod conversion;
pub mod env_state;
pub mod epoch_store;
pub mod geocoding;
pub mod measurement;
pub mod oem;
pub mod server;
pub mod time;
pub mod tracker_errors;
pub mod vector_math;

pub use epoch_store::{EpochStore, EpochWindow};
pub use oem::{Ephemeris, StateVector};
