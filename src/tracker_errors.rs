use thiserror::Error;

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No data found. Please reload data.")]
    EmptyStore,

    #[error("The epoch you requested is not in the data: {0}")]
    EpochNotFound(String),

    #[error("Bad Request. Invalid {name} parameter: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Bad Request. `{name}` parameter is either too large or too small: {value}")]
    ParameterOutOfRange { name: &'static str, value: String },

    #[error("Invalid OEM epoch: {0}")]
    InvalidEpoch(String),

    #[error("Unable to parse the OEM XML document: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    #[error("HTTP reqwest error: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Upstream server answered with status {0}")]
    UpstreamStatus(u16),

    #[error("Reverse geocoding failed: {0}")]
    Geocoding(String),

    #[error("System clock unavailable: {0}")]
    Clock(String),
}

impl From<hifitime::HifitimeError> for TrackerError {
    fn from(err: hifitime::HifitimeError) -> Self {
        TrackerError::Clock(err.to_string())
    }
}

impl PartialEq for TrackerError {
    fn eq(&self, other: &Self) -> bool {
        use TrackerError::*;
        match (self, other) {
            (EmptyStore, EmptyStore) => true,
            (EpochNotFound(a), EpochNotFound(b)) => a == b,
            (
                InvalidParameter { name: n1, value: v1 },
                InvalidParameter { name: n2, value: v2 },
            ) => n1 == n2 && v1 == v2,
            (
                ParameterOutOfRange { name: n1, value: v1 },
                ParameterOutOfRange { name: n2, value: v2 },
            ) => n1 == n2 && v1 == v2,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,
            (UpstreamStatus(a), UpstreamStatus(b)) => a == b,
            (Geocoding(a), Geocoding(b)) => a == b,
            (Clock(a), Clock(b)) => a == b,

            // sources without equality: same variant is enough
            (XmlParse(_), XmlParse(_)) => true,
            (UpstreamRequest(_), UpstreamRequest(_)) => true,

            _ => false,
        }
    }
}
