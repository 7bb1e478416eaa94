mod ai;
mod config;
mod db;
mod engagement;
mod errors;
mod feed;
mod journal;
mod models;
mod music;
mod notices;
mod repo;
mod routes;
mod session;
mod state;
mod suggestions;
mod upload;

use anyhow::Result;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::ai::AiClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::engagement::EngagementService;
use crate::journal::JournalService;
use crate::music::client::SpotifyGateway;
use crate::music::MusicService;
use crate::repo::{ContentRepository, PgRepository};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::SuggestionService;
use crate::upload::probe::HttpAudioProbe;
use crate::upload::s3::S3MediaStore;
use crate::upload::UploadService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Uplift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize AI client
    let ai_client = AiClient::new(config.anthropic_api_key.clone());
    info!("AI client initialized (model: {})", ai::MODEL);

    let repo: Arc<dyn ContentRepository> = Arc::new(PgRepository::new(pool));

    let store = Arc::new(S3MediaStore::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_public_url.clone(),
    ));
    let probe = Arc::new(HttpAudioProbe::new(config.audio_probe_url.clone()));

    let gateway = Arc::new(SpotifyGateway::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
        config.spotify_accounts_url.clone(),
        config.spotify_api_url.clone(),
    ));

    // Build app state
    let state = AppState {
        repo: repo.clone(),
        engagement: Arc::new(EngagementService::new(repo.clone())),
        uploads: Arc::new(UploadService::new(store, probe)),
        music: Arc::new(MusicService::new(gateway, config.mood_playlists.clone())),
        journal: Arc::new(JournalService::new(repo.clone())),
        suggestions: Arc::new(SuggestionService::new(repo, ai_client)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Cap for a single S3 operation. Retries are disabled, so one attempt is
/// the whole call.
const S3_OPERATION_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    aws_sdk_s3::Client::new(&load_s3_config(config).await)
}

async fn load_s3_config(config: &Config) -> aws_config::SdkConfig {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "uplift-media",
    );

    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .retry_config(RetryConfig::disabled())
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(S3_OPERATION_TIMEOUT)
                .build(),
        )
        .load()
        .await
}
