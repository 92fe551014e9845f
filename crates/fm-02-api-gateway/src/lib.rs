//! FM-02 API Gateway - JSON REST interface for the social graph.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (fm-02)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │   HTTP :5000                                              │
//! │      │                                                    │
//! │  ┌───┴──────────────────────────────────────────────┐     │
//! │  │  CORS → Tracing → Metrics → Timeout → BodyLimit  │     │
//! │  └───┬──────────────────────────────────────────────┘     │
//! │      │                                                    │
//! │  ┌───┴───────────────────────────┐                        │
//! │  │  rest::handlers               │  RequestValidator      │
//! │  │  decode → validate → call     │  (router state)        │
//! │  └───┬───────────────────────────┘                        │
//! └──────┼────────────────────────────────────────────────────┘
//!        ▼
//!   fm-01 SocialGraphService
//! ```
//!
//! Every response is the envelope `{"success", "data"?, "error_message"?}`.
//!
//! # Usage
//!
//! ```ignore
//! use fm_02_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let gateway = ApiGatewayService::new(GatewayConfig::default(), graph)?;
//! gateway.start(shutdown_signal).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod rest;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::types::*;
pub use middleware::{GatewayMetrics, RequestValidator};
pub use rest::{AppState, SocialGraph};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
