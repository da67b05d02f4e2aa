// SPDX-License-Identifier: MIT

//! User CRUD routes.

use crate::error::{AppError, Result};
use crate::models::user::UserResponse;
use crate::models::{NewUser, UserUpdate};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(add_user))
        .route(
            "/users/{user_id}",
            get(get_single_user).put(update_user).delete(delete_user),
        )
}

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<UserResponse>,
}

/// List all users.
///
/// Tokens are included here: this endpoint feeds the other backend services,
/// which need them to poll Strava on each user's behalf.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let users = state
        .db
        .list_users()
        .await?
        .into_iter()
        .map(|u| UserResponse::from_user(u, true))
        .collect();
    Ok(Json(UsersResponse { users }))
}

/// Get a single user, token omitted.
async fn get_single_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", user_id)))?;
    Ok(Json(UserResponse::from_user(user, false)))
}

/// Create a user.
async fn add_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> Result<StatusCode> {
    if payload.id.is_none() && payload.email.is_none() {
        return Err(AppError::BadRequest(
            "User payload must carry an id or an email".to_string(),
        ));
    }
    let email = payload
        .email
        .clone()
        .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;

    if let Some(id) = payload.id {
        if state.db.get_user(id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A user with id {} already exists",
                id
            )));
        }
    }
    if state.db.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "A user with the email {} already exists",
            email
        )));
    }

    let id = state.db.insert_user(&payload, &email).await?;
    tracing::info!(user_id = id, "User created");
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a user.
///
/// Only fields present in the payload are applied; the payload id must match
/// the path id.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> Result<StatusCode> {
    if payload.id != Some(user_id) {
        return Err(AppError::BadRequest(format!(
            "User id mismatch: {} in path, {:?} in payload",
            user_id, payload.id
        )));
    }

    let mut user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", user_id)))?;

    if let Some(new_email) = &payload.email {
        if *new_email != user.email {
            if state.db.get_user_by_email(new_email).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "Another user already holds the email {}",
                    new_email
                )));
            }
        }
    }

    payload.apply_to(&mut user);
    state.db.update_user(&user).await?;

    tracing::info!(user_id, "User updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user and everything that hangs off them.
///
/// External resources go first: challenges and objectives cleanup, then
/// Strava token revocation if the user holds a token. Any failure there
/// aborts the deletion with nothing committed. The user's runs are removed
/// by the schema cascade.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", user_id)))?;

    state.cleanup.delete_user_resources(user_id).await?;

    if let Some(token) = &user.strava_token {
        state.strava.deauthorize(token).await?;
    }

    state.db.delete_user(user_id).await?;
    tracing::info!(user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
