// SPDX-License-Identifier: MIT

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// How often a user wants their activity digest.
///
/// The wire mapping is total and closed: anything other than the four
/// lowercase strings below is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportPeriodicity {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriodicity {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportPeriodicity::None => "none",
            ReportPeriodicity::Daily => "daily",
            ReportPeriodicity::Weekly => "weekly",
            ReportPeriodicity::Monthly => "monthly",
        }
    }
}

/// User row as stored in the `users` table.
///
/// `total_speed` and `total_runs` are running aggregates maintained only by
/// the run ingestion path; the update allow-list never touches them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Email address, globally unique
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// Strava OAuth token, revoked on account deletion
    pub strava_token: Option<String>,
    pub age: Option<i64>,
    /// Body weight in kg. Stored as REAL: decimal input becomes a float,
    /// which is a lossy conversion we accept for this field.
    pub weight: Option<f64>,
    /// Maximum heart rate
    pub max_hr: Option<i64>,
    /// Resting heart rate
    pub rest_hr: Option<i64>,
    pub vo2max: Option<f64>,
    pub is_active: bool,
    /// Sum of average speeds over all ingested runs
    pub total_speed: f64,
    /// Number of ingested runs
    pub total_runs: i64,
    pub report_periodicity: ReportPeriodicity,
}

impl User {
    /// Running average speed over all ingested runs, rounded to 2 decimals.
    ///
    /// O(1) over the maintained aggregates; never recomputed from run rows.
    pub fn average_speed(&self) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        round2(self.total_speed / self.total_runs as f64)
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Payload for user creation.
///
/// `id` may be supplied by the caller (the service accepts pre-assigned ids)
/// or left to the store to assign. At least one of `id` and `email` must be
/// present.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub strava_token: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub max_hr: Option<i64>,
    pub rest_hr: Option<i64>,
    pub vo2max: Option<f64>,
    pub is_active: Option<bool>,
    pub report_periodicity: Option<ReportPeriodicity>,
}

/// Payload for partial user update.
///
/// Only the fields listed here are updatable; identity (`id` is only used for
/// the path-match check) and the ingestion-maintained aggregates are not.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub strava_token: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub max_hr: Option<i64>,
    pub rest_hr: Option<i64>,
    pub vo2max: Option<f64>,
    pub is_active: Option<bool>,
    pub report_periodicity: Option<ReportPeriodicity>,
}

impl UserUpdate {
    /// Apply the fields present in the payload onto an existing user.
    ///
    /// This is the explicit allow-list: absent fields stay untouched, and
    /// `total_speed` / `total_runs` cannot be written through updates at all.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(firstname) = &self.firstname {
            user.firstname = Some(firstname.clone());
        }
        if let Some(lastname) = &self.lastname {
            user.lastname = Some(lastname.clone());
        }
        if let Some(token) = &self.strava_token {
            user.strava_token = Some(token.clone());
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
        if let Some(max_hr) = self.max_hr {
            user.max_hr = Some(max_hr);
        }
        if let Some(rest_hr) = self.rest_hr {
            user.rest_hr = Some(rest_hr);
        }
        if let Some(vo2max) = self.vo2max {
            user.vo2max = Some(vo2max);
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(periodicity) = self.report_periodicity {
            user.report_periodicity = periodicity;
        }
    }
}

/// User as returned by the API.
///
/// The Strava token is only exposed on the list endpoint (consumed by the
/// other backend services); the single-user endpoint omits it.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub max_hr: Option<i64>,
    pub rest_hr: Option<i64>,
    pub vo2max: Option<f64>,
    pub is_active: bool,
    pub total_speed: f64,
    pub total_runs: i64,
    pub report_periodicity: ReportPeriodicity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strava_token: Option<String>,
}

impl UserResponse {
    /// Build a response, optionally including the Strava token.
    pub fn from_user(user: User, include_token: bool) -> Self {
        Self {
            id: user.id,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            age: user.age,
            weight: user.weight,
            max_hr: user.max_hr,
            rest_hr: user.rest_hr,
            vo2max: user.vo2max,
            is_active: user.is_active,
            total_speed: user.total_speed,
            total_runs: user.total_runs,
            report_periodicity: user.report_periodicity,
            strava_token: if include_token { user.strava_token } else { None },
        }
    }
}
