//! Application startup and lifecycle management.

use crate::config::DashboardConfig;
use crate::filters::FilterRegistry;
use crate::handlers;
use crate::services::metrics::get_metrics;
use crate::services::{ChartDataSource, Database, PgChartData};
use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::request_id::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: DashboardConfig,
    pub charts: Arc<dyn ChartDataSource>,
}

/// Metrics endpoint for Prometheus scraping.
async fn metrics_handler() -> impl IntoResponse {
    let metrics = get_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        metrics,
    )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application: connect to Postgres, run migrations, bind the
    /// listener.
    pub async fn build(config: DashboardConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;

        let registry = Arc::new(FilterRegistry::new());
        let charts: Arc<dyn ChartDataSource> = Arc::new(PgChartData::new(db, registry));

        Self::build_with_chart_source(config, charts).await
    }

    /// Build the application around an already-constructed data source.
    /// Used by tests to run without a database.
    pub async fn build_with_chart_source(
        config: DashboardConfig,
        charts: Arc<dyn ChartDataSource>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            charts,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Dashboard service listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let api = Router::new()
            .route("/activated-chart", get(handlers::activated_chart))
            .route("/data-alignment", get(handlers::data_alignment))
            .route("/filter-options", get(handlers::filter_options))
            .route("/nano-cluster", get(handlers::nano_cluster))
            .route("/progress-curve", get(handlers::progress_curve))
            .route("/readiness-chart", get(handlers::readiness_chart));

        let router = Router::new()
            .nest("/api/hermes-5g", api)
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(metrics_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
            .with_state(self.state);

        tracing::info!(
            service = "dashboard-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await
    }
}
