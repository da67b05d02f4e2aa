// SPDX-License-Identifier: MIT

//! Run database operations: batch ingestion and filtered queries.

use super::Database;
use crate::error::AppError;
use crate::models::{NewRun, Run};
use sqlx::QueryBuilder;
use std::collections::HashMap;

/// Default page size for run listings.
const DEFAULT_PER_PAGE: u32 = 10;

/// Outcome of a batch ingestion, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Runs inserted
    pub added: u32,
    /// Runs skipped because their strava_id was already stored
    pub duplicates: u32,
    /// Batch entries skipped because the user id was unknown or not numeric
    pub unknown_users: u32,
}

/// Conjunctive filters for run listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunFilter {
    /// Inclusive lower bound on start_date (Unix seconds)
    pub start_date: Option<i64>,
    /// Inclusive upper bound on start_date (Unix seconds)
    pub finish_date: Option<i64>,
    /// Exclusive lower bound on run id (incremental fetch cursor)
    pub from_id: Option<i64>,
    /// Page number (0-indexed); pagination applies only when set
    pub page: Option<u32>,
    /// Page size, defaults to 10 when paginating
    pub per_page: Option<u32>,
}

impl Database {
    /// Ingest a batch of runs, keyed by user id.
    ///
    /// Per-item skip semantics: entries for unknown (or non-numeric) user ids
    /// and runs whose strava_id already exists system-wide are skipped
    /// silently. Each inserted run bumps the owner's `total_speed` and
    /// `total_runs`. The whole batch commits in one transaction.
    pub async fn ingest_runs(
        &self,
        batch: &HashMap<String, Vec<NewRun>>,
    ) -> Result<IngestSummary, AppError> {
        let mut summary = IngestSummary::default();
        let mut tx = self.pool.begin().await?;

        for (user_key, runs) in batch {
            let Ok(runner_id) = user_key.parse::<i64>() else {
                tracing::warn!(user_key = %user_key, "Skipping batch entry with non-numeric user id");
                summary.unknown_users += 1;
                continue;
            };

            let known: Option<i64> =
                sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
                    .bind(runner_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if known.is_none() {
                tracing::debug!(runner_id, "Skipping batch entry for unknown user");
                summary.unknown_users += 1;
                continue;
            }

            for run in runs {
                let duplicate: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM runs WHERE strava_id = ? LIMIT 1")
                        .bind(run.strava_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                if duplicate.is_some() {
                    tracing::debug!(
                        strava_id = run.strava_id,
                        runner_id,
                        "Skipping already-ingested run"
                    );
                    summary.duplicates += 1;
                    continue;
                }

                sqlx::query(
                    r"
                    INSERT INTO runs (title, description, strava_id, distance, start_date,
                                      elapsed_time, average_speed, average_heartrate,
                                      total_elevation_gain, runner_id)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    ",
                )
                .bind(&run.title)
                .bind(&run.description)
                .bind(run.strava_id)
                .bind(run.distance)
                .bind(run.start_date)
                .bind(run.elapsed_time)
                .bind(run.average_speed)
                .bind(run.average_heartrate)
                .bind(run.total_elevation_gain)
                .bind(runner_id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    "UPDATE users SET total_speed = total_speed + ?, total_runs = total_runs + 1 WHERE id = ?",
                )
                .bind(run.average_speed)
                .bind(runner_id)
                .execute(&mut *tx)
                .await?;

                summary.added += 1;
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    /// List a user's runs, filtered and optionally paginated, in id order.
    pub async fn get_runs_for_user(
        &self,
        runner_id: i64,
        filter: &RunFilter,
    ) -> Result<Vec<Run>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM runs WHERE runner_id = ");
        qb.push_bind(runner_id);

        if let Some(start) = filter.start_date {
            qb.push(" AND start_date >= ");
            qb.push_bind(start);
        }
        if let Some(finish) = filter.finish_date {
            qb.push(" AND start_date <= ");
            qb.push_bind(finish);
        }
        if let Some(from_id) = filter.from_id {
            qb.push(" AND id > ");
            qb.push_bind(from_id);
        }

        qb.push(" ORDER BY id");

        if let Some(page) = filter.page {
            let per_page = filter.per_page.unwrap_or(DEFAULT_PER_PAGE);
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(per_page));
            qb.push(" OFFSET ");
            qb.push_bind(i64::from(page) * i64::from(per_page));
        }

        let runs = qb
            .build_query_as::<Run>()
            .fetch_all(&self.pool)
            .await?;
        Ok(runs)
    }

    /// Fetch a single run belonging to the given user.
    pub async fn get_run_for_user(
        &self,
        runner_id: i64,
        run_id: i64,
    ) -> Result<Option<Run>, AppError> {
        let run = sqlx::query_as::<_, Run>("SELECT * FROM runs WHERE id = ? AND runner_id = ?")
            .bind(run_id)
            .bind(runner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(run)
    }
}
