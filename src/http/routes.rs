use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        get_all_ratings_handler, get_blend_ratings_handler, status_handler, submit_rating_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/submit-rating", post(submit_rating_handler))
        .route("/ratings", get(get_all_ratings_handler))
        .route("/ratings/{blend_key}", get(get_blend_ratings_handler))
        .with_state(state)
}
