//! Gallery endpoints over the persisted image store.
//!
//! These expose the store contract over HTTP: list, append, remove by index
//! (out of bounds is a no-op), and atomic full replacement. Every mutation
//! returns the resulting list.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::warn;

use crate::core::AppState;
use crate::utils::OptimizerResult;

#[derive(Debug, Deserialize)]
pub struct AddImage {
    image: String,
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store().snapshot())
}

pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddImage>,
) -> Result<Json<Vec<String>>, StatusCode> {
    reply(state.store().add(body.image))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<String>>, StatusCode> {
    reply(state.store().remove(index))
}

pub async fn replace(
    State(state): State<AppState>,
    Json(images): Json<Vec<String>>,
) -> Result<Json<Vec<String>>, StatusCode> {
    reply(state.store().set(images))
}

fn reply(result: OptimizerResult<Vec<String>>) -> Result<Json<Vec<String>>, StatusCode> {
    match result {
        Ok(images) => Ok(Json(images)),
        Err(e) => {
            warn!("gallery mutation failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
