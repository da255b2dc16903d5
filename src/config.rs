use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::constants::{DEFAULT_GEOCODER_URL, DEFAULT_OEM_URL};

/// Serve the ISS ephemeris over HTTP
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct TrackerConfig {
    /// address to listen on
    #[arg(long, env = "ISS_TRACKER_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// URL of the CCSDS OEM XML document
    #[arg(long, env = "ISS_TRACKER_OEM_URL", default_value = DEFAULT_OEM_URL)]
    pub oem_url: String,

    /// Nominatim-compatible reverse geocoding endpoint
    #[arg(long, env = "ISS_TRACKER_GEOCODER_URL", default_value = DEFAULT_GEOCODER_URL)]
    pub geocoder_url: String,

    /// timeout for every outbound HTTP request, in seconds
    #[arg(long, env = "ISS_TRACKER_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// start with an empty store instead of fetching the OEM data at startup
    #[arg(long)]
    pub skip_initial_load: bool,
}

impl TrackerConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
