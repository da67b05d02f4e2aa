// SPDX-License-Identifier: MIT

//! User database operations.

use super::Database;
use crate::error::AppError;
use crate::models::{NewUser, ReportPeriodicity, User};

impl Database {
    /// Insert a new user and return its id.
    ///
    /// The caller has already checked id/email conflicts; a NULL id lets
    /// SQLite assign the next one.
    pub async fn insert_user(&self, new: &NewUser, email: &str) -> Result<i64, AppError> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, email, firstname, lastname, strava_token, age, weight,
                               max_hr, rest_hr, vo2max, is_active, total_speed, total_runs,
                               report_periodicity)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0.0, 0, ?)
            ",
        )
        .bind(new.id)
        .bind(email)
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(&new.strava_token)
        .bind(new.age)
        .bind(new.weight)
        .bind(new.max_hr)
        .bind(new.rest_hr)
        .bind(new.vo2max)
        .bind(new.is_active.unwrap_or(true))
        .bind(new.report_periodicity.unwrap_or(ReportPeriodicity::None))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch a user by id.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Fetch a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// List all users in id order.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Persist an updated user row.
    ///
    /// Writes only the allow-listed profile fields; the ingestion-maintained
    /// aggregates are deliberately not part of this statement.
    pub async fn update_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r"
            UPDATE users SET
                email = ?, firstname = ?, lastname = ?, strava_token = ?, age = ?,
                weight = ?, max_hr = ?, rest_hr = ?, vo2max = ?, is_active = ?,
                report_periodicity = ?
            WHERE id = ?
            ",
        )
        .bind(&user.email)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.strava_token)
        .bind(user.age)
        .bind(user.weight)
        .bind(user.max_hr)
        .bind(user.rest_hr)
        .bind(user.vo2max)
        .bind(user.is_active)
        .bind(user.report_periodicity)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user; their runs go with them via the cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
