use bb8::Pool;
use bb8_redis::RedisConnectionManager;

#[derive(Clone)]
pub struct AppState {
    pub redis: RedisClient,
    /// Salt mixed into the submitter address hash. Changing it orphans the
    /// dedupe keys of previously stored ratings.
    pub ip_hash_salt: String,
}

pub type RedisClient = Pool<RedisConnectionManager>;
