//! # HTTP surface
//!
//! Thin axum routing layer over [`EpochStore`]. Every handler maps one route onto one store
//! operation; errors are rendered by the [`axum::response::IntoResponse`] impl of
//! [`crate::tracker_errors::TrackerError`] as plain-text messages.
//!
//! ```text
//! GET    /                          entire data set
//! GET    /epochs[?offset=M&limit=N] epoch list
//! GET    /epochs/{epoch}            state vector
//! GET    /epochs/{epoch}/speed      speed
//! GET    /epochs/{epoch}/location   latitude, longitude, altitude, place
//! GET    /now                       position of the nearest epoch
//! GET    /comment | /header | /metadata
//! GET    /help
//! DELETE /delete-data
//! POST   /post-data
//! ```

pub mod handlers;
mod responses;

use std::{future::Future, sync::Arc};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{env_state::TrackerEnv, epoch_store::EpochStore};

pub use responses::HELP_TEXT;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<EpochStore>,
    pub env: Arc<TrackerEnv>,
}

impl AppState {
    pub fn new(store: Arc<EpochStore>, env: TrackerEnv) -> Self {
        AppState {
            store,
            env: Arc::new(env),
        }
    }
}

/// Build the router with all tracker routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_all))
        .route("/epochs", get(handlers::get_epochs))
        .route("/epochs/{epoch}", get(handlers::get_state_vector))
        .route("/epochs/{epoch}/speed", get(handlers::get_speed))
        .route("/epochs/{epoch}/location", get(handlers::get_location))
        .route("/now", get(handlers::get_now))
        .route("/comment", get(handlers::get_comments))
        .route("/header", get(handlers::get_header))
        .route("/metadata", get(handlers::get_metadata))
        .route("/help", get(handlers::get_help))
        .route("/delete-data", delete(handlers::delete_data))
        .route("/post-data", post(handlers::post_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the tracker on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
