// SPDX-License-Identifier: MIT

//! Database layer (SQLite via sqlx).
//!
//! Provides typed operations for:
//! - Users (profiles and running aggregates)
//! - Runs (ingested activities, filtered queries)

mod runs;
mod users;

pub use runs::{IngestSummary, RunFilter};

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database handle wrapping a SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database and run migrations.
    ///
    /// Foreign keys are enabled on every connection so that deleting a user
    /// cascades to their runs.
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory SQLite database lives and dies with its connection, so
        // the pool must hold exactly one and never let it go idle.
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(url = database_url, "Connected to SQLite");
        Ok(db)
    }

    /// Get a reference to the pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                firstname TEXT,
                lastname TEXT,
                strava_token TEXT,
                age INTEGER,
                weight REAL,
                max_hr INTEGER,
                rest_hr INTEGER,
                vo2max REAL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                total_speed REAL NOT NULL DEFAULT 0.0,
                total_runs INTEGER NOT NULL DEFAULT 0,
                report_periodicity TEXT NOT NULL DEFAULT 'none'
                    CHECK (report_periodicity IN ('none', 'daily', 'weekly', 'monthly'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                description TEXT,
                strava_id INTEGER NOT NULL,
                distance REAL NOT NULL,
                start_date INTEGER NOT NULL,
                elapsed_time INTEGER NOT NULL,
                average_speed REAL NOT NULL,
                average_heartrate REAL,
                total_elevation_gain REAL,
                runner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_runs_runner_id ON runs(runner_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_runs_strava_id ON runs(strava_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert the example admin user if no user holds its email yet.
    ///
    /// The Strava token comes from the STRAVA_TOKEN environment variable.
    pub async fn seed_default_user(&self) -> Result<(), AppError> {
        if self
            .get_user_by_email("example@example.com")
            .await?
            .is_some()
        {
            return Ok(());
        }

        let token = std::env::var("STRAVA_TOKEN").ok();
        sqlx::query(
            r"
            INSERT INTO users (email, firstname, lastname, age, weight, max_hr, rest_hr, vo2max, strava_token)
            VALUES ('example@example.com', 'Admin', 'Admin', 42, 60, 180, 50, 63, ?)
            ",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        tracing::info!("Seeded default admin user");
        Ok(())
    }
}
