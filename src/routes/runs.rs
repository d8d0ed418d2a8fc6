// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run creation and lifecycle routes.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::{NewRun, Position, Run};
use crate::routes::MessageResponse;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes<S: Storage>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/api/runs", post(create_run::<S>).get(list_runs::<S>))
        .route("/api/runs/{run_id}", get(get_run::<S>))
        .route("/api/runs/{run_id}/start", post(start_run::<S>))
        .route("/api/runs/{run_id}/stop", post(stop_run::<S>))
        .route("/api/runs/{run_id}/positions", get(list_positions::<S>))
}

async fn create_run<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Json(new_run): Json<NewRun>,
) -> Result<(StatusCode, Json<Run>)> {
    let run = state.tracker.create_run(new_run).await?;
    Ok((StatusCode::CREATED, Json(run)))
}

#[derive(Deserialize)]
struct RunsQuery {
    athlete: Option<u64>,
}

async fn list_runs<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<Vec<Run>>> {
    let athlete_id = params
        .athlete
        .ok_or_else(|| AppError::BadRequest("Missing athlete query parameter".to_string()))?;
    Ok(Json(state.tracker.runs_for_athlete(athlete_id).await?))
}

async fn get_run<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Path(run_id): Path<u64>,
) -> Result<Json<Run>> {
    Ok(Json(state.tracker.get_run(run_id).await?))
}

async fn start_run<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Path(run_id): Path<u64>,
) -> Result<Json<MessageResponse>> {
    state.tracker.start_run(run_id).await?;
    Ok(Json(MessageResponse {
        message: "Run started".to_string(),
    }))
}

async fn stop_run<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Path(run_id): Path<u64>,
) -> Result<Json<MessageResponse>> {
    state.tracker.stop_run(run_id).await?;
    Ok(Json(MessageResponse {
        message: "Run finished".to_string(),
    }))
}

async fn list_positions<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Path(run_id): Path<u64>,
) -> Result<Json<Vec<Position>>> {
    Ok(Json(state.tracker.positions_for_run(run_id).await?))
}
