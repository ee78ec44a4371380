// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Atlas API client tests using wiremock HTTP mocks.

use atlas_tracker::services::AtlasClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_list_locations_follows_pagination() {
    let server = MockServer::start().await;

    let page1 = serde_json::json!({
        "results": [
            { "id": 1, "name": "Asema Jyväskylä 1", "lat": "62.2426", "lng": "25.7473" },
            { "id": 2, "name": "Tori Jyväskylä 2", "lat": "62.2430", "lng": "25.7480" }
        ],
        "next": format!("{}/public-map-point-markers/100/?format=json&page=2", server.uri())
    });
    let page2 = serde_json::json!({
        "results": [
            { "id": 3, "name": "Satama Jyväskylä 3", "lat": "62.2380", "lng": "25.7800" }
        ],
        "next": null
    });

    Mock::given(method("GET"))
        .and(path("/public-map-point-markers/100/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public-map-point-markers/100/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page2))
        .mount(&server)
        .await;

    let client = AtlasClient::new(&server.uri());
    let locations = client.list_locations("100").await.expect("should fetch");

    assert_eq!(locations.len(), 3);
    assert_eq!(locations[0].id, 1);
    assert_eq!(locations[0].lat, 62.2426);
    assert_eq!(locations[2].name, "Satama Jyväskylä 3");
}

#[tokio::test]
async fn test_fetch_campaign_flattens_reserved_resources() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "af79ad25-1bc0-4451-a8bc-600d12b36a68",
        "name": "Kahvila Oy",
        "description": "Kesäkampanja 2026",
        "reserved_resources": [
            {
                "start_date": "2026-06-01",
                "end_date": "2026-06-30",
                "inventory_resource": {
                    "map_point_markers": [
                        { "id": 10, "name": "Asema Jyväskylä 10", "lat": "62.24", "lng": "25.74" },
                        { "id": 11, "name": "Tori Jyväskylä 11", "lat": "62.25", "lng": "25.75" }
                    ]
                }
            },
            {
                "start_date": "2026-07-01",
                "end_date": "2026-07-15",
                "inventory_resource": {
                    "map_point_markers": [
                        { "id": 12, "name": "Satama Jyväskylä 12", "lat": "62.23", "lng": "25.78" }
                    ]
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(
            "/reservation-resources-map/af79ad25-1bc0-4451-a8bc-600d12b36a68/",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = AtlasClient::new(&server.uri());
    let fetch = client
        .fetch_campaign("af79ad25-1bc0-4451-a8bc-600d12b36a68")
        .await
        .expect("should fetch campaign");

    assert_eq!(fetch.name, "Kahvila Oy");
    assert_eq!(fetch.description, "Kesäkampanja 2026");
    assert_eq!(fetch.markers.len(), 3);

    // Markers inherit the enclosing resource's window
    let june = fetch.markers.iter().find(|m| m.marker_id == 10).unwrap();
    assert_eq!(june.start_date.to_string(), "2026-06-01");
    assert_eq!(june.end_date.to_string(), "2026-06-30");
    let july = fetch.markers.iter().find(|m| m.marker_id == 12).unwrap();
    assert_eq!(july.start_date.to_string(), "2026-07-01");

    // Fresh markers are never pre-visited
    assert!(fetch.markers.iter().all(|m| !m.visited));
}

#[tokio::test]
async fn test_campaign_resource_without_inventory_is_skipped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "x",
        "name": "Tyhjä Oy",
        "description": null,
        "reserved_resources": [
            { "start_date": "2026-06-01", "end_date": "2026-06-30", "inventory_resource": null }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/reservation-resources-map/x/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = AtlasClient::new(&server.uri());
    let fetch = client.fetch_campaign("x").await.expect("should fetch");
    assert!(fetch.markers.is_empty());
    assert_eq!(fetch.description, "");
}

#[tokio::test]
async fn test_campaign_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reservation-resources-map/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = AtlasClient::new(&server.uri());
    let err = client.fetch_campaign("missing").await.unwrap_err();
    assert!(err.is_atlas_not_found());
}

#[tokio::test]
async fn test_upstream_500_is_surfaced_unretried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-map-point-markers/100/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1) // exactly one attempt, no retry
        .mount(&server)
        .await;

    let client = AtlasClient::new(&server.uri());
    let err = client.list_locations("100").await.unwrap_err();
    assert!(!err.is_atlas_not_found());
    assert!(err.to_string().contains("500"));
}

/// End-to-end: load a campaign through the HTTP API against a mocked
/// upstream, then watch it land in the render plan.
#[tokio::test]
async fn test_load_campaign_through_api() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::{Arc, RwLock};
    use tower::ServiceExt;

    let server = MockServer::start().await;
    let body = serde_json::json!({
        "id": "c9",
        "name": "Yritys c9",
        "description": "",
        "reserved_resources": [
            {
                "start_date": "2026-06-01",
                "end_date": "2026-06-30",
                "inventory_resource": {
                    "map_point_markers": [
                        { "id": 3, "name": "Asema Jyväskylä Kauppakatu 3", "lat": "62.24", "lng": "25.74" }
                    ]
                }
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/reservation-resources-map/c9/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mut config = atlas_tracker::config::Config::test_default();
    config.api_base_url = server.uri();
    let mut map = atlas_tracker::state::MapState::default();
    map.replace_locations(common::base_locations());
    let state = Arc::new(atlas_tracker::AppState {
        atlas: AtlasClient::new(&config.api_base_url),
        config,
        db: atlas_tracker::db::JsonDb::new_mock(),
        map: RwLock::new(map),
    });
    let app = atlas_tracker::routes::create_router(state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/campaigns/c9/load")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let inner = state.map.read().unwrap();
    assert!(inner.registry.contains("c9"));
    assert_eq!(inner.campaign_markers.len(), 1);
    drop(inner);

    // The overlay now suppresses the base marker for id 3
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/markers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let plan: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(plan["stats"]["total"], 10);
    let campaign_pins: Vec<_> = plan["markers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["campaign_id"] == "c9")
        .collect();
    assert_eq!(campaign_pins.len(), 1);
}
