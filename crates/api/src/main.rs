#[tokio::main]
async fn main() {
    sportiva_observability::init();

    let config = sportiva_api::app::services::AppConfig::from_env();
    let app = sportiva_api::app::build_app(config).await;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
