use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use telemost_bridge::adapters::auth::JwtTokenService;
use telemost_bridge::adapters::bitrix::BitrixClient;
use telemost_bridge::adapters::http::{build_router, AppState};
use telemost_bridge::adapters::sqlite::{self, SqliteConferenceRepository, SqliteGrantRepository};
use telemost_bridge::adapters::telemost::{TelemostClient, TelemostClientConfig};
use telemost_bridge::application::handlers::access::{
    BootstrapAdminsCommand, BootstrapAdminsHandler,
};
use telemost_bridge::config::AppConfig;
use telemost_bridge::domain::access::PortalDomain;
use telemost_bridge::domain::foundation::{UserId, ValidationError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        base_path = %config.server.normalized_base_path(),
        "Starting telemost bridge"
    );

    let pool = sqlite::connect(&config.database).await?;
    let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
    let grants = Arc::new(SqliteGrantRepository::new(pool.clone()));

    let admins = config
        .access
        .bootstrap_pairs()?
        .into_iter()
        .map(|(portal, user)| -> Result<_, ValidationError> {
            Ok((PortalDomain::new(&portal)?, UserId::new(user)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let seeded = BootstrapAdminsHandler::new(grants.clone())
        .handle(BootstrapAdminsCommand { admins })
        .await?;
    if seeded > 0 {
        tracing::info!(seeded, "Bootstrap admins granted");
    }

    if config.bitrix.webhook_base().is_none() {
        tracing::warn!("No Bitrix24 webhook configured; portal user endpoints will answer 503");
    }

    let state = AppState {
        conference_repository: Arc::new(SqliteConferenceRepository::new(pool)),
        grant_repository: grants,
        conference_provider: Arc::new(TelemostClient::new(TelemostClientConfig::from(
            &config.telemost,
        ))?),
        portal_directory: Arc::new(BitrixClient::new(
            config.bitrix.webhook_base(),
            config.server.request_timeout(),
        )?),
        session_validator: tokens.clone(),
        token_service: tokens,
    };

    let app = build_router(state, &config.server);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
