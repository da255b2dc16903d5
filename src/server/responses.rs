use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::tracker_errors::TrackerError;

pub const HELP_TEXT: &str = "
    Usage: curl localhost:5000[ROUTE]

    An HTTP service for querying and returning interesting information from the ISS data set.

    Route                           Method  What it returns
    /                               GET     Return entire data set
    /epochs                         GET     Return list of all Epochs in the data set
    /epochs?limit=int&offset=int    GET     Return modified list of Epochs given query parameters
    /epochs/<epoch>                 GET     Return state vectors for a specific Epoch from the data set
    /epochs/<epoch>/speed           GET     Return instantaneous speed for a specific Epoch in the data set
    /epochs/<epoch>/location        GET     Return latitude, longitude, altitude, and geoposition for given Epoch
    /now                            GET     Return latitude, longitude, altitude, and geoposition for Epoch that is nearest in time
    /comment                        GET     Return 'comment' list object from ISS data
    /header                         GET     Return 'header' dict object from ISS data
    /metadata                       GET     Return 'metadata' dict object from ISS data
    /help                           GET     Return help text that briefly describes each route
    /delete-data                    DELETE  Delete all data from the data store
    /post-data                      POST    Reload the data store with data from the web
";

impl TrackerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackerError::EmptyStore | TrackerError::EpochNotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::InvalidParameter { .. } | TrackerError::ParameterOutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            TrackerError::InvalidEpoch(_)
            | TrackerError::XmlParse(_)
            | TrackerError::UpstreamRequest(_)
            | TrackerError::UpstreamStatus(_)
            | TrackerError::Geocoding(_) => StatusCode::BAD_GATEWAY,
            TrackerError::Clock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }
        (status, format!("{self}\n")).into_response()
    }
}
