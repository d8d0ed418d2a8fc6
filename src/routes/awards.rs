// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only listings of collectibles and granted challenges.

use crate::db::Storage;
use crate::error::Result;
use crate::models::{Challenge, CollectibleItem};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes<S: Storage>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/api/collectible_items", get(list_items::<S>))
        .route("/api/challenges", get(list_challenges::<S>))
}

async fn list_items<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<CollectibleItem>>> {
    Ok(Json(state.db.list_items().await?))
}

#[derive(Deserialize)]
struct ChallengesQuery {
    /// Filter by athlete id
    athlete: Option<u64>,
}

async fn list_challenges<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ChallengesQuery>,
) -> Result<Json<Vec<Challenge>>> {
    tracing::debug!(athlete = ?params.athlete, "Listing challenges");
    Ok(Json(state.db.list_challenges(params.athlete).await?))
}
