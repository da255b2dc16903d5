#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower::ServiceExt;

use iss_tracker::{
    constants::Degree,
    env_state::TrackerEnv,
    geocoding::{GeoDescriptor, ReverseGeocoder},
    server::{router, AppState},
    tracker_errors::TrackerResult,
    EpochStore,
};

pub const FIXTURE_PATH: &str = "tests/data/iss_oem_sample.xml";

pub const FIXTURE_EPOCHS: [&str; 6] = [
    "2023-048T12:00:00.000Z",
    "2023-048T12:04:00.000Z",
    "2023-048T12:08:00.000Z",
    "2023-048T12:12:00.000Z",
    "2023-048T12:16:00.000Z",
    "2023-048T12:20:00.000Z",
];

pub fn fixture_xml() -> String {
    std::fs::read_to_string(FIXTURE_PATH).expect("OEM fixture must be readable")
}

/// Geocoder answering the same descriptor for every coordinate
pub struct FixedGeocoder(pub GeoDescriptor);

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
    async fn reverse(&self, _latitude: Degree, _longitude: Degree) -> TrackerResult<GeoDescriptor> {
        Ok(self.0.clone())
    }
}

/// Application state with the fixture loaded (or not) and no reachable upstream
pub fn app_state(loaded: bool) -> AppState {
    let store = Arc::new(EpochStore::new());
    if loaded {
        store.load_xml(&fixture_xml()).expect("fixture must parse");
    }

    let env = TrackerEnv::with_geocoder(
        reqwest::Client::new(),
        "http://127.0.0.1:9/unreachable.xml",
        Arc::new(FixedGeocoder(GeoDescriptor::Unknown)),
    );
    AppState::new(store, env)
}

/// Environment pointing at real endpoints with a short timeout
pub fn http_env(oem_url: &str, geocoder_url: &str) -> TrackerEnv {
    TrackerEnv::new(oem_url, geocoder_url, Duration::from_secs(5)).expect("client must build")
}

/// Serve `router` on an ephemeral local port
pub async fn spawn_http(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub async fn send(state: &AppState, method: &str, uri: &str) -> Response {
    router(state.clone())
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
