use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "Rating service is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
