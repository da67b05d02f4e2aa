// SPDX-License-Identifier: MIT

//! Cleanup calls to the companion microservices.
//!
//! When a user is deleted, their challenges and objectives live in separate
//! services keyed by user id. Both must be removed before the user row goes
//! away; a failed cleanup aborts the deletion.

use crate::error::AppError;

/// Client for the challenges and objectives resource-cleanup endpoints.
#[derive(Clone)]
pub struct CleanupClient {
    http: reqwest::Client,
    challenges_url: String,
    objectives_url: String,
}

impl CleanupClient {
    pub fn new(challenges_url: &str, objectives_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            challenges_url: challenges_url.trim_end_matches('/').to_string(),
            objectives_url: objectives_url.trim_end_matches('/').to_string(),
        }
    }

    /// Remove all challenges and objectives belonging to a user.
    ///
    /// Invoked synchronously during user deletion; the first failure is
    /// returned and the caller aborts the delete.
    pub async fn delete_user_resources(&self, user_id: i64) -> Result<(), AppError> {
        self.delete(
            &format!("{}/users/{}/challenges", self.challenges_url, user_id),
            "challenges",
        )
        .await?;
        self.delete(
            &format!("{}/users/{}/objectives", self.objectives_url, user_id),
            "objectives",
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, url: &str, service: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalService(format!("{} cleanup request failed: {}", service, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "{} cleanup failed: HTTP {}: {}",
                service, status, body
            )));
        }

        tracing::debug!(service, "External cleanup succeeded");
        Ok(())
    }
}
