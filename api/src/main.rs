use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use idm_api::{config, create_app, AppState, RefreshStoreProbe};
use idm_core::repositories::{FallbackMetrics, FallbackRefreshTokenStore, InMemoryRefreshTokenStore, RefreshTokenStore};
use idm_core::services::credentials::StaticCredentialVerifier;
use idm_core::services::token::{FallbackSweeper, JwksPublisher, KeyManager, SweeperConfig, TokenIssuer, TokenIssuerConfig};
use idm_infra::RedisRefreshTokenStore;
use idm_shared::config::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    let environment = Environment::from_env();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(environment.default_log_filter()));

    info!("Starting IDM auth service ({})", environment);

    let app_config = config::load().context("Failed to load configuration")?;
    let token_config = &app_config.token;

    // One keypair for the process lifetime; the service cannot sign without it
    let key_id = token_config.key_id.clone();
    let key_bits = token_config.rsa_key_bits;
    let keys = tokio::task::spawn_blocking(move || KeyManager::generate(key_id, key_bits))
        .await
        .context("Key generation task failed")?
        .context("Failed to generate signing key")?;
    let keys = Arc::new(keys);

    // Refresh token store: Redis first, process memory when Redis is unreachable
    let fallback = Arc::new(InMemoryRefreshTokenStore::new());
    let store: Arc<dyn RefreshTokenStore>;
    let metrics: Arc<FallbackMetrics>;
    if app_config.cache.enabled {
        let redis = RedisRefreshTokenStore::new(app_config.cache.clone()).context("Invalid Redis configuration")?;
        let tiered = FallbackRefreshTokenStore::new(redis, Arc::clone(&fallback));
        metrics = tiered.metrics();
        store = Arc::new(tiered);
    } else {
        warn!("Redis disabled, using the in-process refresh token store only");
        metrics = Arc::new(FallbackMetrics::default());
        store = fallback.clone();
    }

    FallbackSweeper::new(Arc::clone(&fallback), SweeperConfig::from(token_config)).start_background_task();

    let issuer = Arc::new(TokenIssuer::new(
        Arc::clone(&keys),
        store,
        StaticCredentialVerifier::from(&app_config.credentials),
        TokenIssuerConfig::from(token_config),
    ));
    let jwks = Arc::new(JwksPublisher::new(keys));

    let app_state = web::Data::new(AppState::new(
        issuer,
        jwks,
        RefreshStoreProbe::new(metrics, fallback),
    ));

    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
