// src/main.rs

use score_engine::config::Config;
use score_engine::routes;
use score_engine::sources::FsSource;
use score_engine::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (.env included)
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "score_engine.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let state = AppState::new(config.clone());

    // Initial run so the read routes have something to serve.
    // A failure here is logged; the server still starts and can be re-run via the API.
    if config.ingest_on_startup {
        let source = FsSource::new(config.data_dir.clone());
        match state.run_ingestion(&source, &config.test_name).await {
            Ok(report) => tracing::info!(
                "Startup ingestion done: {} students from {}",
                report.metadata.total_students,
                source.data_dir().display()
            ),
            Err(e) => tracing::error!("Startup ingestion failed: {:?}", e),
        }
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
