//! Application layer: the service implementing every inbound port.

pub mod service;

pub use service::SocialGraphService;
