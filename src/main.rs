#[tokio::main]
async fn main() {
    blend_ratings_be::start_server().await;
}
