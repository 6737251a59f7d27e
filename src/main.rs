use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocalize_backend::infrastructure::config::{Config, LogFormat};
use vocalize_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use vocalize_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Vocalize Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection and apply migrations
    check_connection(&pool).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database connection verified, migrations applied");

    // Create OpenAI client
    let openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    let openai_client = Arc::new(Client::with_config(openai_config));
    tracing::info!(model = %config.tts_model, "OpenAI TTS client initialized");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool and provider client)
    let history_repo = Arc::new(
        vocalize_backend::infrastructure::repositories::PostgresHistoryRepository::new(
            pool.clone(),
        ),
    );
    let synthesizer = Arc::new(
        vocalize_backend::infrastructure::repositories::OpenAiSpeechSynthesizer::new(
            openai_client,
            config.tts_model.clone(),
        ),
    );

    // 2. Instantiate services (inject repositories)
    let tts_service = Arc::new(vocalize_backend::domain::tts::TtsService::new(
        synthesizer,
        config.tts_max_chunk_chars,
    ));
    let history_service = Arc::new(vocalize_backend::domain::history::HistoryService::new(
        history_repo,
    ));

    // 3. Instantiate controllers (inject services)
    let tts_controller = Arc::new(vocalize_backend::controllers::tts::TtsController::new(
        tts_service,
        config.max_text_chars,
    ));
    let history_controller = Arc::new(
        vocalize_backend::controllers::history::HistoryController::new(history_service),
    );

    // Start HTTP server with all routes
    start_http_server(pool, config, tts_controller, history_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "vocalize_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "vocalize_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
