use pantry_service::MovementNotifier;

#[tokio::main]
async fn main() {
    pantry_observability::init();

    let addr = std::env::var("PANTRY_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let services = std::sync::Arc::new(pantry_api::app::AppServices::build());
    services.notifier.initialize();

    let app = pantry_api::app::build_app(services.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .unwrap();

    services.notifier.shutdown();
}
