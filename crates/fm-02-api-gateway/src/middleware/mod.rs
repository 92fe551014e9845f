//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → CORS → Tracing → Metrics → Timeout → Validation → Handler

pub mod cors;
pub mod metrics;
pub mod timeout;
pub mod tracing;
pub mod validation;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsLayer, RequestTimer};
pub use timeout::TimeoutLayer;
pub use self::tracing::TracingLayer;
pub use validation::{RequestValidator, ValidationLayer};
