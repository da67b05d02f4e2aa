// SPDX-License-Identifier: MIT

//! BeepBeep dataservice: store runners and their recorded runs.
//!
//! This crate provides the data backend for the BeepBeep running tracker:
//! user and run storage, batch ingestion of Strava activities, and
//! per-user running-average statistics.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{CleanupClient, StravaClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub cleanup: CleanupClient,
    pub strava: StravaClient,
}
