use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use nk_api::{create_app, telemetry, AppState, SessionKeys};
use nk_core::services::{
    Clock, SystemClock, VerificationCleanupService, VerificationServiceConfig,
};
use nk_infra::{build_stores, create_email_service};
use nk_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("Failed to initialize tracing")?;

    info!(
        environment = %config.environment,
        storage = ?config.verification.storage,
        email_provider = %config.email.provider,
        "Starting Notekeep API server"
    );

    let sessions = SessionKeys::new(&config.session).context("Invalid session configuration")?;
    let verification_config =
        VerificationServiceConfig::from_settings(&config.server.base_url, &config.verification)
            .context("Invalid verification configuration")?;

    let stores = build_stores(&config)
        .await
        .context("Failed to initialize storage")?;
    if let Some(database) = &stores.database {
        database
            .health_check()
            .await
            .context("Database health check failed")?;
        info!(pool = %database.get_statistics(), "Database ready");
    }
    let users = Arc::new(stores.users);
    let verifications = Arc::new(stores.verifications);
    let email = Arc::new(create_email_service(&config.email));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let cleanup = Arc::new(VerificationCleanupService::new(
        verifications.clone(),
        clock.clone(),
        config.verification.cleanup_interval_seconds,
    ));
    let cleanup_task = cleanup.start_background_task();

    let state = web::Data::new(AppState::new(
        users,
        verifications,
        email,
        clock,
        verification_config,
        sessions,
    ));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, base_url = %config.server.base_url, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(state.clone()).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    if let Some(task) = cleanup_task {
        task.abort();
    }
    if let Some(database) = stores.database {
        database.close().await;
    }

    Ok(())
}
