use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::{NoopTranslator, Translator};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{block_config, evaluation, health, invitations, survey_blocks};
use crate::services::email::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub email: EmailService,
    pub translator: Arc<dyn Translator>,
}

/// Builds the application with the default no-op translation service.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_translator(config, pool, Arc::new(NoopTranslator))
}

/// Builds the application with an explicit translation service.
pub fn create_app_with_translator(
    config: Config,
    pool: PgPool,
    translator: Arc<dyn Translator>,
) -> Router {
    let config = Arc::new(config);
    let email = EmailService::new(config.email.clone());

    let state = AppState {
        pool,
        config: config.clone(),
        email,
        translator,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Block routes; identity comes from the host-issued bearer token,
    // checked by the StudentAuth extractor per handler.
    let block_routes = Router::new()
        .route(
            "/api/v1/blocks/:block_id/config",
            post(block_config::save_config),
        )
        .route(
            "/api/v1/blocks/:block_id/editor-context",
            get(block_config::editor_context),
        )
        .route("/api/v1/blocks/:block_id/init", post(invitations::view_init))
        .route(
            "/api/v1/blocks/:block_id/invitation",
            post(invitations::send_invitation),
        )
        .route(
            "/api/v1/courses/:course_id/survey-blocks",
            get(survey_blocks::list_survey_blocks),
        );

    // Public routes (no authentication required).
    // The evaluation link token is itself the capability.
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route(
            "/api/v1/evaluation/:url_hash",
            get(evaluation::resolve_evaluation),
        )
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(block_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
