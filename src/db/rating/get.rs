use redis::AsyncCommands;

use crate::{errors::AppError, models::Rating, models::redis::RedisKey, state::RedisClient};

pub async fn get_ratings_for_blend(
    blend_key: &str,
    redis: RedisClient,
) -> Result<Vec<Rating>, AppError> {
    collect_ratings(RedisKey::blend_ratings(blend_key), redis).await
}

pub async fn get_all_ratings(redis: RedisClient) -> Result<Vec<Rating>, AppError> {
    collect_ratings(RedisKey::all_ratings(), redis).await
}

async fn collect_ratings(index_key: String, redis: RedisClient) -> Result<Vec<Rating>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let dedupe_keys: Vec<String> = conn
        .smembers(&index_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut ratings = Vec::with_capacity(dedupe_keys.len());

    for dedupe_key in dedupe_keys {
        let rating_json: Option<String> = conn
            .get(RedisKey::rating(&dedupe_key))
            .await
            .map_err(AppError::RedisCommandError)?;

        match rating_json {
            Some(rating_json) => {
                let rating: Rating = serde_json::from_str(&rating_json)
                    .map_err(|e| AppError::Deserialization(e.to_string()))?;
                ratings.push(rating);
            }
            None => {
                tracing::warn!("Index entry without rating record: {}", dedupe_key);
            }
        }
    }

    Ok(ratings)
}
