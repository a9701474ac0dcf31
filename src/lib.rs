mod db;
pub mod errors;
mod http;
mod middleware;
pub mod models;
mod state;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use state::AppState;
use std::net::SocketAddr;

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let manager = RedisConnectionManager::new(redis_url).expect("Invalid REDIS_URL");
    let redis_pool = Pool::builder()
        .build(manager)
        .await
        .expect("Failed to build Redis pool");

    // Per-deployment salt; see AppState. Defaults to the value production
    // has always used so stored dedupe keys stay valid.
    let ip_hash_salt =
        std::env::var("IP_HASH_SALT").unwrap_or_else(|_| "TabacWikiSalt".to_string());

    let state = AppState {
        redis: redis_pool,
        ip_hash_salt,
    };

    let global_rate_limiter = create_global_rate_limiter();

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer())
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") });

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8787);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind address");

    tracing::info!("Rating service listening on 0.0.0.0:{}", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
