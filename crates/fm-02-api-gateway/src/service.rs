//! API Gateway service - HTTP server lifecycle and router assembly.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::{
    create_cors_layer, GatewayMetrics, MetricsLayer, RequestValidator, TimeoutLayer,
    TracingLayer, ValidationLayer,
};
use crate::rest::{self, AppState, SocialGraph};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{error, info};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    graph: Arc<dyn SocialGraph>,
    metrics: Arc<GatewayMetrics>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, graph: Arc<dyn SocialGraph>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            graph,
            metrics: Arc::new(GatewayMetrics::new()),
        })
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// In-flight requests are drained before returning.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %local, "[fm-02] HTTP server listening");

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("[fm-02] received shutdown signal");
            })
            .await;

        if let Err(e) = result {
            error!(error = %e, "[fm-02] HTTP server error");
            return Err(GatewayError::Internal(e.to_string()));
        }

        info!("[fm-02] API Gateway stopped");
        Ok(())
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Full HTTP router with middleware and state
    pub fn router(&self) -> Router {
        let state = AppState {
            graph: Arc::clone(&self.graph),
            validator: RequestValidator::new(&self.config.limits),
            metrics: Arc::clone(&self.metrics),
        };

        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new())
            .layer(MetricsLayer::new(Arc::clone(&self.metrics)))
            .layer(TimeoutLayer::new(self.config.timeouts.request))
            .layer(ValidationLayer::new(self.config.limits.clone()));

        rest::routes().layer(middleware).with_state(state)
    }
}
