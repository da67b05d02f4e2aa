// SPDX-License-Identifier: MIT

//! Strava API client for token revocation.

use crate::error::AppError;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
}

impl StravaClient {
    /// Create a new Strava client against the given base URL
    /// (`https://www.strava.com` in production, a stub in tests).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Deauthorize the application for a user.
    ///
    /// POST {base}/oauth/deauthorize
    /// Authorization: Bearer {access_token}
    ///
    /// This invalidates all access and refresh tokens for the user
    /// and removes the app from their Strava settings.
    pub async fn deauthorize(&self, access_token: &str) -> Result<(), AppError> {
        let url = format!("{}/oauth/deauthorize", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Deauthorization request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Deauthorization failed: HTTP {}: {}",
                status, body
            )));
        }

        tracing::info!("Strava deauthorization successful");
        Ok(())
    }
}
