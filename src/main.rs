//! MentorHub API server.
//!
//! Reads `MENTORHUB__*` configuration, picks an adapter for every port and
//! serves the HTTP API. Each external integration falls back to a local
//! development adapter when its credentials are absent.

use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mentorhub::adapters::ai::{OpenAiRewriter, OpenAiRewriterConfig, PassthroughRewriter};
use mentorhub::adapters::attachments::LocalAttachmentStorage;
use mentorhub::adapters::auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
use mentorhub::adapters::email::{
    LoggingNotificationSender, ResendConfig, ResendNotificationSender,
};
use mentorhub::adapters::http::{build_router, AppState, CheckoutUrls};
use mentorhub::adapters::memory::{
    InMemoryApplicantRepository, InMemoryAssignmentRepository, InMemoryMessageRepository,
    InMemoryNoteRepository, InMemoryThreadRepository,
};
use mentorhub::adapters::postgres::{
    PostgresApplicantRepository, PostgresAssignmentRepository, PostgresMessageRepository,
    PostgresNoteRepository, PostgresReadCursorStore, PostgresThreadRepository,
};
use mentorhub::adapters::storage::{FileReadStateStore, InMemoryReadStateStore};
use mentorhub::adapters::stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
use mentorhub::adapters::InMemoryEventBus;
use mentorhub::config::AppConfig;
use mentorhub::ports::{
    AnswerRewriter, NotificationSender, PaymentProvider, ReadStateStore, SessionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);
    info!(
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting MentorHub"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config.server).nest_service(
        "/files",
        ServeDir::new(&config.storage.attachments_dir),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.server.wants_json_logs() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = Arc::new(LocalAttachmentStorage::new(
        config.storage.attachments_dir.clone(),
        config.storage.attachments_public_url.clone(),
    ));

    let state = match config.database.url() {
        Some(url) => {
            let pool = connect(config, url).await?;
            AppState {
                applicants: Arc::new(PostgresApplicantRepository::new(pool.clone())),
                assignments: Arc::new(PostgresAssignmentRepository::new(pool.clone())),
                messages: Arc::new(PostgresMessageRepository::new(pool.clone())),
                threads: Arc::new(PostgresThreadRepository::new(pool.clone())),
                notes: Arc::new(PostgresNoteRepository::new(pool.clone())),
                read_state: Arc::new(PostgresReadCursorStore::new(pool)),
                payment_provider: payment_provider(config),
                notifier: notifier(config),
                rewriter: rewriter(config)?,
                attachments: storage,
                event_publisher: Arc::new(InMemoryEventBus::new()),
                session_validator: session_validator(config),
                checkout_urls: checkout_urls(config),
            }
        }
        None => {
            warn!("No database configured; records are kept in memory only");
            AppState {
                applicants: Arc::new(InMemoryApplicantRepository::new()),
                assignments: Arc::new(InMemoryAssignmentRepository::new()),
                messages: Arc::new(InMemoryMessageRepository::new()),
                threads: Arc::new(InMemoryThreadRepository::new()),
                notes: Arc::new(InMemoryNoteRepository::new()),
                read_state: file_read_state(config),
                payment_provider: payment_provider(config),
                notifier: notifier(config),
                rewriter: rewriter(config)?,
                attachments: storage,
                event_publisher: Arc::new(InMemoryEventBus::new()),
                session_validator: session_validator(config),
                checkout_urls: checkout_urls(config),
            }
        }
    };

    if config.payment.is_live_mode() {
        info!("Stripe live mode enabled");
    }
    Ok(state)
}

async fn connect(config: &AppConfig, url: &str) -> anyhow::Result<PgPool> {
    let db = &config.database;
    let pool = db
        .pool_options()
        .connect(url)
        .await
        .context("connecting to PostgreSQL")?;

    if db.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("running migrations")?;
        info!("Database migrations applied");
    }
    Ok(pool)
}

fn file_read_state(config: &AppConfig) -> Arc<dyn ReadStateStore> {
    match &config.storage.read_state_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Read state stored as YAML files");
            Arc::new(FileReadStateStore::new(dir))
        }
        None => Arc::new(InMemoryReadStateStore::new()),
    }
}

fn payment_provider(config: &AppConfig) -> Arc<dyn PaymentProvider> {
    let payment = &config.payment;
    let webhook_secret = SecretString::new(payment.webhook_secret_or_default());

    match payment.api_key() {
        Some(key) => {
            let stripe = StripeConfig::new(
                SecretString::new(key.to_string()),
                webhook_secret,
                payment.stripe_price_id.clone().unwrap_or_default(),
            )
            .with_require_livemode(payment.require_livemode);
            Arc::new(StripePaymentAdapter::new(stripe))
        }
        None => {
            warn!("Stripe not configured; using the mock payment provider");
            Arc::new(MockPaymentProvider::new(webhook_secret))
        }
    }
}

fn notifier(config: &AppConfig) -> Arc<dyn NotificationSender> {
    match config.email.api_key() {
        Some(key) => Arc::new(ResendNotificationSender::new(ResendConfig::new(
            SecretString::new(key.to_string()),
            config.email.from_header(),
        ))),
        None => {
            warn!("Resend not configured; notifications are only logged");
            Arc::new(LoggingNotificationSender::new())
        }
    }
}

fn rewriter(config: &AppConfig) -> anyhow::Result<Arc<dyn AnswerRewriter>> {
    let ai = &config.ai;
    match ai.api_key() {
        Some(key) => {
            let rewriter = OpenAiRewriter::new(
                OpenAiRewriterConfig::new(SecretString::new(key.to_string()))
                    .with_model(ai.model.clone())
                    .with_base_url(ai.base_url.clone())
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )
            .context("building the OpenAI client")?;
            Ok(Arc::new(rewriter))
        }
        None => {
            warn!("OpenAI not configured; answers are returned unchanged");
            Ok(Arc::new(PassthroughRewriter))
        }
    }
}

fn session_validator(config: &AppConfig) -> Arc<dyn SessionValidator> {
    let auth = &config.auth;
    match auth.secret() {
        Some(secret) => {
            let mut jwt = JwtConfig::new(SecretString::new(secret.to_string()));
            if let Some(issuer) = &auth.issuer {
                jwt = jwt.with_issuer(issuer.clone());
            }
            if let Some(audience) = &auth.audience {
                jwt = jwt.with_audience(audience.clone());
            }
            Arc::new(JwtSessionValidator::new(jwt))
        }
        None => {
            warn!("No JWT secret configured; every bearer token will be rejected");
            Arc::new(MockSessionValidator::new())
        }
    }
}

fn checkout_urls(config: &AppConfig) -> CheckoutUrls {
    CheckoutUrls {
        success_url: config.payment.success_url.clone(),
        cancel_url: config.payment.cancel_url.clone(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
