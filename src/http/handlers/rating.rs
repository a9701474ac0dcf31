use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use uuid::Uuid;

use crate::{
    db::rating::{get::get_all_ratings, get::get_ratings_for_blend, post::submit_rating},
    errors::AppError,
    middleware::client_ip,
    models::{Rating, rating::RatingPayload, rating::hash_ip},
    state::AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingResponse {
    pub success: bool,
    pub message: String,
    pub rating_id: Uuid,
}

pub async fn submit_rating_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<SubmitRatingResponse>, (StatusCode, Json<Value>)> {
    // Parsed by hand so a malformed body still gets the JSON error shape.
    let payload: RatingPayload = serde_json::from_str(&body)
        .map_err(|e| AppError::MalformedPayload(e.to_string()).to_response())?;

    let normalized = payload.normalize().map_err(|e| e.to_response())?;

    let address = client_ip(&headers, Some(&ConnectInfo(addr)));
    let rating = normalized.into_rating(hash_ip(&address, &state.ip_hash_salt));
    let blend_key = rating.blend_key.clone();

    match submit_rating(rating, state.redis.clone()).await {
        Ok(rating_id) => {
            tracing::info!("Stored rating {} for blend {}", rating_id, blend_key);
            Ok(Json(SubmitRatingResponse {
                success: true,
                message: "Rating submitted successfully".to_string(),
                rating_id,
            }))
        }
        Err(err) => {
            tracing::error!("Error submitting rating for blend {}: {}", blend_key, err);
            Err(err.to_response())
        }
    }
}

pub async fn get_blend_ratings_handler(
    State(state): State<AppState>,
    Path(blend_key): Path<String>,
) -> Result<Json<Vec<Rating>>, (StatusCode, Json<Value>)> {
    let ratings = get_ratings_for_blend(&blend_key, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving ratings for blend {}: {}", blend_key, e);
            e.to_response()
        })?;

    Ok(Json(ratings))
}

pub async fn get_all_ratings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Rating>>, (StatusCode, Json<Value>)> {
    let ratings = get_all_ratings(state.redis.clone()).await.map_err(|e| {
        tracing::error!("Error retrieving ratings: {}", e);
        e.to_response()
    })?;

    Ok(Json(ratings))
}
