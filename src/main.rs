use std::fmt;
use std::future::Future;
use std::sync::Arc;

use billing_gateway::adapters::auth::JwtTokenService;
use billing_gateway::adapters::clock::SystemClock;
use billing_gateway::adapters::email::{LoggingMailer, ResendMailer};
use billing_gateway::adapters::http::{app_router, AccountAppState, AppState, BillingAppState};
use billing_gateway::adapters::record_store::{
    InMemoryRecordStore, PostgresRecordStore, RecordStoreRepository,
};
use billing_gateway::application::LoginCodeSettings;
use billing_gateway::config::AppConfig;
use billing_gateway::ports::{Clock, Mailer, RecordStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let addr = config.server.socket_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        public_url = %config.server.public_url,
        "Starting billing gateway on {}",
        addr
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mailer = build_mailer(&config);

    let state = match &config.database {
        Some(database) => {
            let pool = database.pool_options().connect(&database.url).await?;
            let store = PostgresRecordStore::new(pool);
            if database.run_migrations {
                store.migrate().await?;
                tracing::info!("Record store migrations applied");
            }
            tracing::info!("Database connection established");
            build_state(store, &config, mailer, clock)
        }
        None => {
            tracing::warn!("No database configured, records are kept in memory");
            build_state(InMemoryRecordStore::new(), &config, mailer, clock)
        }
    };

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Billing gateway listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Billing gateway stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    match &config.email.resend_api_key {
        Some(key) => Arc::new(ResendMailer::new(key.clone(), config.email.from_header())),
        None => {
            tracing::warn!("No Resend API key configured, login codes are only logged");
            Arc::new(LoggingMailer::new())
        }
    }
}

fn build_state<S: RecordStore + 'static>(
    store: S,
    config: &AppConfig,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let repository = Arc::new(RecordStoreRepository::new(store));
    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.token_secret,
        config.auth.token_issuer.as_str(),
        config.auth.token_ttl_secs,
        clock.clone(),
    ));

    AppState {
        billing: BillingAppState {
            tenants: repository.clone(),
            products: repository.clone(),
            payments: repository.clone(),
            clock: clock.clone(),
            public_url: Arc::from(config.server.public_url.as_str()),
        },
        account: AccountAppState {
            users: repository,
            mailer,
            tokens: tokens.clone(),
            clock,
            login: LoginCodeSettings {
                code_length: config.login.code_length,
                subject: config.email.login_subject.clone(),
            },
        },
        auth: tokens,
        request_timeout: config.server.request_timeout(),
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running until killed.
async fn wait_for_shutdown<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
