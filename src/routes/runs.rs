// SPDX-License-Identifier: MIT

//! Run ingestion, query and statistics routes.

use crate::db::RunFilter;
use crate::error::{AppError, Result};
use crate::models::{NewRun, Run};
use crate::time_utils::parse_query_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add_runs", post(add_runs))
        .route("/users/{user_id}/runs", get(get_runs))
        .route("/users/{user_id}/runs/{run_id}", get(get_single_run))
        .route("/users/{user_id}/average", get(get_average))
}

/// Ingest a batch of runs keyed by user id.
///
/// Unknown users and already-ingested runs are skipped, not errors: the
/// Strava fetcher re-posts overlapping windows and the batch must stay
/// idempotent. 204 even when nothing was inserted.
async fn add_runs(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<HashMap<String, Vec<NewRun>>>,
) -> Result<StatusCode> {
    let summary = state.db.ingest_runs(&batch).await?;

    tracing::info!(
        added = summary.added,
        duplicates = summary.duplicates,
        unknown_users = summary.unknown_users,
        "Run batch ingested"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct RunsQuery {
    /// Inclusive lower bound on start date (ISO 8601, `Z` suffix)
    #[serde(rename = "start-date")]
    start_date: Option<String>,
    /// Inclusive upper bound on start date
    #[serde(rename = "finish-date")]
    finish_date: Option<String>,
    /// Return only runs with id strictly greater than this
    #[serde(rename = "from-id")]
    from_id: Option<i64>,
    /// Page number (0-indexed); omitting it returns the whole filtered set
    page: Option<u32>,
    per_page: Option<u32>,
}

fn parse_date_param(raw: Option<&str>, name: &str) -> Result<Option<i64>> {
    raw.map(|value| {
        parse_query_date(value)
            .map(|date| date.timestamp())
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Error parsing the {} parameter: {} is not a valid date",
                    name, value
                ))
            })
    })
    .transpose()
}

/// List a user's runs with date/id filters and optional pagination.
async fn get_runs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<Vec<Run>>> {
    if state.db.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("No user with id {}", user_id)));
    }

    let filter = RunFilter {
        start_date: parse_date_param(params.start_date.as_deref(), "start-date")?,
        finish_date: parse_date_param(params.finish_date.as_deref(), "finish-date")?,
        from_id: params.from_id,
        page: params.page,
        per_page: params.per_page,
    };

    let runs = state.db.get_runs_for_user(user_id, &filter).await?;
    Ok(Json(runs))
}

/// Get a single run owned by the given user.
async fn get_single_run(
    State(state): State<Arc<AppState>>,
    Path((user_id, run_id)): Path<(i64, i64)>,
) -> Result<Json<Run>> {
    if state.db.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("No user with id {}", user_id)));
    }

    let run = state
        .db
        .get_run_for_user(user_id, run_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No run with id {} for user {}", run_id, user_id))
        })?;
    Ok(Json(run))
}

#[derive(Serialize)]
struct AverageResponse {
    average_speed: f64,
}

/// Running average speed for a user, from the maintained aggregates.
async fn get_average(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<AverageResponse>> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", user_id)))?;

    Ok(Json(AverageResponse {
        average_speed: user.average_speed(),
    }))
}
