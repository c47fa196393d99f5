// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tally::SourcesConfig;
use tally_dashboard::{build_router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    let dir = tempfile::tempdir().unwrap();
    let config = SourcesConfig::default().with_data_dir(dir.path());
    let write = |file: &str, contents: &str| std::fs::write(dir.path().join(file), contents).unwrap();
    write(
        &config.directory_file,
        "Store Name,latitude,longitude\nA,10.0,20.0\nB,,22.0\nC,14.0,\n",
    );
    write(&config.menu_file, "Item,Calories\nTea,50\nLatte,150\nWater,-\n");
    write(
        &config.portfolio_file,
        "reward,difficulty,duration,cluster\n10,10,7,0\n5,20,10,1\n2,10,7,0\n",
    );
    let controller = tally::start(&config).unwrap();
    build_router(AppState::new(controller))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_event(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/events")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_row_counts() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rows"]["menu"], 3);
}

#[tokio::test]
async fn test_layout_exposes_tabs_and_control_defaults() {
    let (status, body) = send(app(), get("/api/layout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Starbucks Dashboard");
    assert_eq!(body["tabs"].as_array().unwrap().len(), 3);
    assert_eq!(body["tabs"][2]["view"], "location-heatmap");
    let dropdown = &body["controls"]["cluster_dropdown"];
    assert_eq!(dropdown["default"], "0");
    assert_eq!(dropdown["options"][1]["label"], "Cluster 1");
    assert_eq!(body["controls"]["calorie_slider"]["max"], 150.0);
}

#[tokio::test]
async fn test_view_returns_published_spec() {
    let (status, body) = send(app(), get("/api/views/segmentation")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "scatter");
    assert_eq!(body["status"]["rows"], 2);
}

#[tokio::test]
async fn test_unknown_view_is_not_found() {
    let (status, body) = send(app(), get("/api/views/pie-chart")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_VIEW");
}

#[tokio::test]
async fn test_event_recomputes_only_its_view() {
    let app = app();
    let (status, body) = send(
        app.clone(),
        post_event(r#"{"event":"cluster_selected","value":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "segmentation");
    assert_eq!(body["sequence"], 2);
    assert_eq!(body["superseded"], false);
    assert_eq!(body["spec"]["status"]["rows"], 1);

    let (_, heatmap) = send(app, get("/api/views/location-heatmap")).await;
    assert_eq!(heatmap["options"]["center"]["lat"], 12.0);
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let (status, body) = send(app(), post_event(r#"{"event":"zoom","level":3}"#)).await;
    assert!(status.is_client_error());
    assert_eq!(body["code"], "INVALID_EVENT");
}
