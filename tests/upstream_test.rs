mod common;

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use common::{body_json, body_text, fixture_xml, http_env, send, spawn_http, FIXTURE_EPOCHS};
use iss_tracker::{
    geocoding::{GeoDescriptor, NominatimGeocoder, ReverseGeocoder},
    server::AppState,
    tracker_errors::TrackerError,
    EpochStore,
};

/// Nominatim stand-in: land in the northern hemisphere, ocean in the southern one
async fn fake_reverse(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("format").map(String::as_str) != Some("jsonv2") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let latitude: f64 = match params.get("lat").and_then(|lat| lat.parse().ok()) {
        Some(lat) => lat,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };

    if latitude >= 0.0 {
        Json(json!({
            "place_id": 42,
            "display_name": "Tamanrasset, Algeria",
            "address": {"city": "Tamanrasset", "country": "Algeria", "country_code": "dz"}
        }))
        .into_response()
    } else {
        Json(json!({"error": "Unable to geocode"})).into_response()
    }
}

/// Local upstream serving the OEM fixture, a few broken variants and a reverse geocoder
async fn spawn_upstream() -> SocketAddr {
    let fixture = fixture_xml();
    let upstream = Router::new()
        .route(
            "/oem.xml",
            get(move || {
                let xml = fixture.clone();
                async move { xml }
            }),
        )
        .route(
            "/truncated.xml",
            get(|| async { "<ndm><oem><header><ORIGINATOR>JSC</ORIGINATOR>" }),
        )
        .route("/empty.xml", get(|| async { "<ndm><oem/></ndm>" }))
        .route(
            "/down.xml",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "maintenance") }),
        )
        .route("/reverse", get(fake_reverse))
        .route(
            "/broken-reverse",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
    spawn_http(upstream).await
}

fn state_for(addr: SocketAddr, oem_path: &str, store: Arc<EpochStore>) -> AppState {
    let env = http_env(
        &format!("http://{addr}{oem_path}"),
        &format!("http://{addr}/reverse"),
    );
    AppState::new(store, env)
}

#[tokio::test]
async fn test_post_data_loads_upstream_document() {
    let addr = spawn_upstream().await;
    let state = state_for(addr, "/oem.xml", Arc::new(EpochStore::new()));

    let response = send(&state, "GET", "/epochs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&state, "POST", "/post-data").await;
    assert_eq!(response.status(), StatusCode::OK);
    let loaded = body_json(response).await;
    assert_eq!(loaded["metadata"]["OBJECT_NAME"], "ISS");
    assert_eq!(loaded["state_vectors"].as_array().unwrap().len(), 6);

    let response = send(&state, "GET", "/epochs").await;
    assert_eq!(body_json(response).await, json!(FIXTURE_EPOCHS));

    // reloading replaces the data set with an identical one
    let response = send(&state, "POST", "/post-data").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.store.list_epochs(&Default::default()).unwrap().len(), 6);
}

#[tokio::test]
async fn test_post_data_failures_keep_previous_data() {
    let addr = spawn_upstream().await;
    let store = Arc::new(EpochStore::new());
    store.load_xml(&fixture_xml()).unwrap();
    let before = store.snapshot().unwrap();

    for path in ["/down.xml", "/truncated.xml", "/empty.xml", "/missing.xml"] {
        let state = state_for(addr, path, store.clone());
        let response = send(&state, "POST", "/post-data").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY, "{path}");
        assert!(!body_text(response).await.is_empty(), "{path}");

        assert_eq!(*store.snapshot().unwrap(), *before, "{path}");
    }
}

#[tokio::test]
async fn test_post_data_after_delete() {
    let addr = spawn_upstream().await;
    let store = Arc::new(EpochStore::new());
    store.load_xml(&fixture_xml()).unwrap();
    let state = state_for(addr, "/oem.xml", store);

    assert_eq!(
        send(&state, "DELETE", "/delete-data").await.status(),
        StatusCode::OK
    );
    assert_eq!(send(&state, "GET", "/header").await.status(), StatusCode::NOT_FOUND);

    assert_eq!(send(&state, "POST", "/post-data").await.status(), StatusCode::OK);
    let response = send(&state, "GET", "/header").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ORIGINATOR"], "JSC");
}

#[tokio::test]
async fn test_nominatim_geocoder() {
    let addr = spawn_upstream().await;
    let client = reqwest::Client::new();

    let geocoder = NominatimGeocoder::new(client.clone(), format!("http://{addr}/reverse"));
    match geocoder.reverse(22.79, 5.52).await.unwrap() {
        GeoDescriptor::Place(place) => {
            assert_eq!(place.display_name, "Tamanrasset, Algeria");
            assert_eq!(place.address["country_code"], "dz");
        }
        GeoDescriptor::Unknown => panic!("expected a place"),
    }
    assert_eq!(
        geocoder.reverse(-48.87, -123.39).await.unwrap(),
        GeoDescriptor::Unknown
    );

    let broken = NominatimGeocoder::new(client, format!("http://{addr}/broken-reverse"));
    assert!(matches!(
        broken.reverse(0.0, 0.0).await,
        Err(TrackerError::Geocoding(_))
    ));
}

#[tokio::test]
async fn test_location_through_nominatim() {
    let addr = spawn_upstream().await;
    let store = Arc::new(EpochStore::new());
    store.load_xml(&fixture_xml()).unwrap();
    let state = state_for(addr, "/oem.xml", store);

    // first vector lies below the equator (Z < 0), the last one above it (Z > 0)
    let response = send(&state, "GET", &format!("/epochs/{}/location", FIXTURE_EPOCHS[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let south = body_json(response).await;
    assert!(south["latitude"].as_f64().unwrap() < 0.0);
    assert_eq!(south["geo"], "unknown");

    let response = send(&state, "GET", &format!("/epochs/{}/location", FIXTURE_EPOCHS[5])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let north = body_json(response).await;
    assert!(north["latitude"].as_f64().unwrap() > 0.0);
    assert_eq!(north["geo"]["display_name"], "Tamanrasset, Algeria");
    assert_eq!(north["geo"]["address"]["country"], "Algeria");
}

#[tokio::test]
async fn test_location_geocoder_down() {
    let addr = spawn_upstream().await;
    let store = Arc::new(EpochStore::new());
    store.load_xml(&fixture_xml()).unwrap();
    let env = http_env(
        &format!("http://{addr}/oem.xml"),
        &format!("http://{addr}/broken-reverse"),
    );
    let state = AppState::new(store, env);

    let response = send(&state, "GET", &format!("/epochs/{}/location", FIXTURE_EPOCHS[0])).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response).await.starts_with("Reverse geocoding failed"));

    // speed does not need the geocoder
    let response = send(&state, "GET", &format!("/epochs/{}/speed", FIXTURE_EPOCHS[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
}
