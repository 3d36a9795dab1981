//! Account handlers: register, login, list users.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Body of `/register` and `/login`. Missing fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    state.users().register(&body.username, &body.password).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Registration successful",
    })))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let is_admin = state
        .users()
        .authenticate(&body.username, &body.password)
        .await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Login successful",
        "is_admin": is_admin,
    })))
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.users().list_users().await)
}
