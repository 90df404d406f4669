//! HTTP server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing and metrics initialization
//! - Qdrant client and collection bootstrap
//! - Optional embedding provider setup
//! - Router assembly (API, docs, health, readiness, metrics)
//! - Graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{
    HealthCheckFuture, create_production_app, create_router, health_router, run_health_checks,
};
use domain_vector::{
    ApiState, QdrantIndex, VectorApiDoc, VectorIndex, VectorService, VisualizationTemplate,
    embedding::provider_from_env, handlers,
};
use eyre::{Result, WrapErr};
use observability::{init_metrics, metrics_handler, metrics_middleware};
use tracing::{info, warn};

use crate::config::Config;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Run the HTTP server
///
/// 1. Loads configuration and sets up structured logging
/// 2. Installs the Prometheus recorder
/// 3. Builds the Qdrant client and makes sure the collection exists
/// 4. Optionally initializes an embedding provider for `/chat`
/// 5. Serves until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if configuration is invalid, the visualization template
/// cannot be loaded, or the listener cannot bind.
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    core_config::tracing::init_tracing(&config.environment);

    init_metrics().wrap_err("Failed to install Prometheus recorder")?;

    info!("Using Qdrant at {} (collection '{}')", config.qdrant.url, config.qdrant.collection);
    let index = QdrantIndex::new(config.qdrant.clone()).wrap_err("Failed to create Qdrant client")?;

    // The gateway still starts when Qdrant is down; /ready reports it.
    match index.ensure_collection(config.dimensions as u64).await {
        Ok(true) => info!("Collection '{}' created", index.collection()),
        Ok(false) => info!("Collection '{}' already exists", index.collection()),
        Err(e) => warn!("Could not verify collection: {}", e),
    }

    let mut service = VectorService::new(index).with_dimensions(config.dimensions);

    match provider_from_env().wrap_err("Failed to configure embedding provider")? {
        Some(provider) => {
            info!("{} embedding provider configured", provider.name());
            service = service.with_embedding_provider(provider);
        }
        None => info!("EMBEDDING_PROVIDER not set, /chat will be unavailable"),
    }

    let template = match &config.template_path {
        Some(path) => {
            info!("Loading visualization template from {}", path.display());
            VisualizationTemplate::from_file(path)
        }
        None => VisualizationTemplate::embedded(),
    }
    .wrap_err("Failed to load visualization template")?;

    let app = build_router(&config, service, template)?;

    info!("Starting {} v{}", config.app.name, config.app.version);

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async {
        info!("Shutting down: no connections to drain");
    })
    .await
    .wrap_err("Server error")?;

    info!("Vector gateway shutdown complete");
    Ok(())
}

/// Assembles the full application router.
///
/// - vector API routes at the root, with request metrics
/// - `/api-docs/openapi.json` and `/scalar`
/// - `/health`, `/ready` and `/metrics`
pub fn build_router<I: VectorIndex + 'static>(
    config: &Config,
    service: VectorService<I>,
    template: VisualizationTemplate,
) -> Result<Router> {
    let state = ApiState::new(service, template);
    let service = Arc::clone(&state.service);

    let api_routes = handlers::router(state)
        .route_layer(middleware::from_fn(metrics_middleware))
        .merge(health_router(config.app))
        .merge(ready_router(service))
        .route("/metrics", get(metrics_handler));

    create_router::<VectorApiDoc>(api_routes, &config.server, &config.cors_origins)
        .wrap_err("Failed to build router")
}

/// Router with the `/ready` endpoint, which checks that the index answers.
pub fn ready_router<I: VectorIndex + 'static>(service: Arc<VectorService<I>>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler::<I>))
        .with_state(service)
}

async fn ready_handler<I: VectorIndex>(State(service): State<Arc<VectorService<I>>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "index",
        Box::pin(async {
            service
                .index()
                .describe()
                .await
                .map(|_| ())
                .map_err(|e| format!("Index describe failed: {}", e))
        }),
    )];

    run_health_checks(checks).await.into_response()
}
