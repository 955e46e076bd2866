use mongodb::Client;
use tracing::info;

use aula::config::AppConfig;
use aula::router::build_router;
use aula::state::AppState;
use aula::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env();

    let client = Client::with_uri_str(&config.mongo_url)
        .await
        .expect("failed to connect to MongoDB");
    let db = client.database(&config.db_name);

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state, &config.cors_origins);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("aula service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
