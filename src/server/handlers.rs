use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    epoch_store::{EpochWindow, Location, NowReport},
    measurement::Measurement,
    oem::{Ephemeris, EphemerisHeader, EphemerisMetadata, StateVector},
    time::now_utc,
    tracker_errors::{TrackerError, TrackerResult},
};

use super::{AppState, HELP_TEXT};

/// Raw `offset`/`limit` values, validated by [`EpochWindow::parse`]
#[derive(Debug, Deserialize)]
pub struct EpochsQuery {
    offset: Option<String>,
    limit: Option<String>,
}

pub async fn get_all(State(state): State<AppState>) -> TrackerResult<Json<Arc<Ephemeris>>> {
    Ok(Json(state.store.snapshot()?))
}

pub async fn get_epochs(
    State(state): State<AppState>,
    Query(query): Query<EpochsQuery>,
) -> TrackerResult<Json<Vec<String>>> {
    let window = EpochWindow::parse(query.offset.as_deref(), query.limit.as_deref())?;
    let epochs = state.store.list_epochs(&window)?;

    // a window starting past the data is a client error here, not an empty page
    if epochs.is_empty() && window.offset() > 0 {
        return Err(TrackerError::ParameterOutOfRange {
            name: "offset",
            value: window.offset().to_string(),
        });
    }
    Ok(Json(epochs))
}

pub async fn get_state_vector(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> TrackerResult<Json<StateVector>> {
    Ok(Json(state.store.state_vector(&epoch)?))
}

pub async fn get_speed(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> TrackerResult<Json<Measurement>> {
    Ok(Json(state.store.speed(&epoch)?))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> TrackerResult<Json<Location>> {
    let location = state.store.location(&epoch, state.env.geocoder()).await?;
    Ok(Json(location))
}

pub async fn get_now(State(state): State<AppState>) -> TrackerResult<Json<NowReport>> {
    let instant = now_utc()?;
    let report = state.store.now(state.env.geocoder(), instant).await?;
    Ok(Json(report))
}

pub async fn get_comments(
    State(state): State<AppState>,
) -> TrackerResult<Json<Vec<Option<String>>>> {
    Ok(Json(state.store.comments()?))
}

pub async fn get_header(State(state): State<AppState>) -> TrackerResult<Json<EphemerisHeader>> {
    Ok(Json(state.store.header()?))
}

pub async fn get_metadata(
    State(state): State<AppState>,
) -> TrackerResult<Json<EphemerisMetadata>> {
    Ok(Json(state.store.metadata()?))
}

pub async fn get_help() -> &'static str {
    HELP_TEXT
}

pub async fn delete_data(State(state): State<AppState>) -> Response {
    match state.store.clear() {
        Ok(()) => "All the data has been removed.\n".into_response(),
        Err(TrackerError::EmptyStore) => {
            (StatusCode::NOT_FOUND, "No data to delete.\n").into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn post_data(State(state): State<AppState>) -> TrackerResult<Json<Arc<Ephemeris>>> {
    let ephemeris = state.env.fetch_ephemeris().await?;
    Ok(Json(state.store.load(ephemeris)))
}
