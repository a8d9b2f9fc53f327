//! HTTP surface: the axum router and its handlers.

mod convert;
mod gallery;
mod optimize;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};

use crate::core::AppState;

/// Request body cap. Base64 inflates payloads by a third, so this sits well
/// above any realistic source image while still bounding memory per request.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/optimize", post(optimize::optimize))
        .route("/crop-and-optimize", post(convert::crop_and_optimize))
        .route(
            "/images",
            get(gallery::list).post(gallery::add).put(gallery::replace),
        )
        .route("/images/{index}", delete(gallery::remove))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
