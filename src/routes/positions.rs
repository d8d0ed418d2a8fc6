// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fix ingestion route.

use crate::db::Storage;
use crate::error::Result;
use crate::models::NewFix;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes<S: Storage>() -> Router<Arc<AppState<S>>> {
    Router::new().route("/api/positions", post(ingest_position::<S>))
}

/// Announcement returned instead of the stored fix when an item is found.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DiscoveryResponse {
    pub message: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub item_id: u64,
}

async fn ingest_position<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Json(fix): Json<NewFix>,
) -> Result<Response> {
    let outcome = state.tracker.ingest_position(fix).await?;

    let response = match outcome.discovered {
        Some(item) => (
            StatusCode::CREATED,
            Json(DiscoveryResponse {
                message: format!("You found item {}", item.name),
                item_id: item.id,
            }),
        )
            .into_response(),
        None => (StatusCode::CREATED, Json(outcome.position)).into_response(),
    };
    Ok(response)
}
