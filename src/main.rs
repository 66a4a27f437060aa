//! Letterdrop server entry point.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use letterdrop::adapters::email::ResendMailer;
use letterdrop::adapters::http::{subscription_router, SubscriptionAppState};
use letterdrop::adapters::postgres::{pool, PostgresSubscriberStore};
use letterdrop::application::handlers::subscription::{
    LookupSubscriberHandler, SubmitSubscriptionHandler, VerifySubscriptionHandler,
};
use letterdrop::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting letterdrop"
    );

    let db_pool = pool::init(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(db_pool).await?;
    }

    let store = Arc::new(PostgresSubscriberStore::new(db_pool.clone()));
    let mailer = Arc::new(ResendMailer::new(
        config.email.clone(),
        config.confirmation.clone(),
    ));

    let state = SubscriptionAppState {
        submit: Arc::new(SubmitSubscriptionHandler::new(
            store.clone(),
            mailer,
            config.confirmation.clone(),
        )),
        verify: Arc::new(VerifySubscriptionHandler::new(store.clone())),
        lookup: Arc::new(LookupSubscriberHandler::new(store)),
    };

    let app = subscription_router()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing connection pool");
    pool::close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| tracing::error!(error = %e, "failed to listen for ctrl-c"));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for sigterm"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
