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
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tally::{ChartSpec, DashboardLayout, Emission, ReactiveController, UiEvent, ViewId};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ReactiveController>,
    pub layout: Arc<DashboardLayout>,
}
impl AppState {
    pub fn new(controller: Arc<ReactiveController>) -> Self {
        let layout = Arc::new(DashboardLayout::new(controller.controls().clone()));
        Self { controller, layout }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip)]
    status: StatusCode,
}
impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            status,
        }
    }
}
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "INVALID_EVENT", rejection.body_text())
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/layout", get(layout))
        .route("/api/views/{view}", get(view_spec))
        .route("/api/events", post(handle_event))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let context = state.controller.context();
    Json(json!({
        "status": "ok",
        "loaded_at": context.loaded_at(),
        "rows": {
            "directory": context.directory().row_count(),
            "menu": context.menu().row_count(),
            "portfolio": context.portfolio().row_count(),
        },
    }))
}

async fn layout(State(state): State<AppState>) -> Json<Arc<DashboardLayout>> {
    Json(state.layout.clone())
}

async fn view_spec(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Json<Arc<ChartSpec>>, ApiError> {
    let view: ViewId = view
        .parse()
        .map_err(|e: String| ApiError::new(StatusCode::NOT_FOUND, "UNKNOWN_VIEW", e))?;
    state.controller.current(view).map(Json).ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "VIEW_NOT_READY",
            format!("view '{view}' has not been rendered yet"),
        )
    })
}

async fn handle_event(
    State(state): State<AppState>,
    payload: Result<Json<UiEvent>, JsonRejection>,
) -> Result<Json<Emission>, ApiError> {
    let Json(event) = payload?;
    debug!(view = %event.view(), "Received UI event");
    let controller = state.controller.clone();
    let emission = tokio::task::spawn_blocking(move || controller.handle(event))
        .await
        .map_err(|e| {
            warn!(error = %e, "View computation panicked");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "VIEW_COMPUTATION_FAILED",
                e.to_string(),
            )
        })?;
    Ok(Json(emission))
}
