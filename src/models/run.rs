// SPDX-License-Identifier: MIT

//! Run model for storage and API.
//!
//! Run timestamps are Unix seconds end to end: that is what the upstream
//! activity feed delivers, what the `runs` table stores, and what the API
//! returns. Only the query-parameter date filters speak ISO-8601.

use serde::{Deserialize, Serialize};

/// Run row as stored in the `runs` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Run {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Strava activity ID, the system-wide deduplication key for ingestion
    pub strava_id: i64,
    /// Distance in meters
    pub distance: f64,
    /// Start of the run, Unix seconds
    pub start_date: i64,
    /// Elapsed time in seconds
    pub elapsed_time: i64,
    /// Average speed in km/h
    pub average_speed: f64,
    pub average_heartrate: Option<f64>,
    pub total_elevation_gain: Option<f64>,
    /// Owning user
    pub runner_id: i64,
}

/// Run payload as received from the Strava fetcher (`POST /add_runs`).
#[derive(Debug, Clone, Deserialize)]
pub struct NewRun {
    pub title: Option<String>,
    pub description: Option<String>,
    pub strava_id: i64,
    pub distance: f64,
    /// Unix seconds
    pub start_date: i64,
    pub elapsed_time: i64,
    pub average_speed: f64,
    pub average_heartrate: Option<f64>,
    pub total_elevation_gain: Option<f64>,
}
