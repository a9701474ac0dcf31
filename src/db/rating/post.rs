use uuid::Uuid;

use crate::{errors::AppError, models::Rating, models::redis::RedisKey, state::RedisClient};

pub async fn submit_rating(rating: Rating, redis: RedisClient) -> Result<Uuid, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let rating_key = RedisKey::rating(&rating.dedupe_key);
    let rating_json =
        serde_json::to_string(&rating).map_err(|e| AppError::Serialization(e.to_string()))?;

    // NX makes the store enforce one rating per (ip hash, blend) pair, so
    // concurrent submissions cannot race past the duplicate check.
    let stored: Option<String> = redis::cmd("SET")
        .arg(&rating_key)
        .arg(rating_json)
        .arg("NX")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if stored.is_none() {
        return Err(AppError::DuplicateRating);
    }

    let _: () = redis::pipe()
        .cmd("SADD")
        .arg(RedisKey::blend_ratings(&rating.blend_key))
        .arg(&rating.dedupe_key)
        .ignore()
        .cmd("SADD")
        .arg(RedisKey::all_ratings())
        .arg(&rating.dedupe_key)
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(rating.id)
}
