//! Request validation.
//!
//! Two parts:
//! - `ValidationLayer` rejects oversized bodies before any handler runs.
//! - `RequestValidator` checks decoded fields. It is a plain value held in
//!   the router state and handed to each handler; there is no global
//!   validator instance.

use crate::domain::config::LimitsConfig;
use crate::domain::error::ApiError;
use crate::domain::types::RelationRequest;
use axum::{
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::warn;

/// Body size limit layer
#[derive(Clone)]
pub struct ValidationLayer {
    config: Arc<LimitsConfig>,
}

impl ValidationLayer {
    pub fn new(config: LimitsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Validation service
#[derive(Clone)]
pub struct ValidationService<S> {
    inner: S,
    config: Arc<LimitsConfig>,
}

impl<S> Service<Request<Body>> for ValidationService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Fast path: declared length
            if let Some(len) = req
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<usize>().ok())
            {
                if len > config.max_request_size {
                    warn!(
                        size = len,
                        max = config.max_request_size,
                        "[fm-02] request too large (from header)"
                    );
                    return Ok(too_large(len, config.max_request_size));
                }
            }

            if req.method() != Method::POST {
                return inner.call(req).await;
            }

            let (parts, body) = req.into_parts();
            let body_bytes = match read_body_with_limit(body, config.max_request_size).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, "[fm-02] failed to read request body");
                    return Ok(e.into_response());
                }
            };

            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

async fn read_body_with_limit(body: Body, max_size: usize) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, max_size)
        .await
        .map_err(|_| ApiError::payload_too_large(format!("request body exceeds {} bytes", max_size)))
}

fn too_large(size: usize, max: usize) -> Response {
    ApiError::payload_too_large(format!("request size {} exceeds limit {}", size, max))
        .into_response()
}

/// Field-level validation for decoded request bodies
#[derive(Debug, Clone)]
pub struct RequestValidator {
    max_email_length: usize,
    max_text_length: usize,
}

impl RequestValidator {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            max_email_length: limits.max_email_length,
            max_text_length: limits.max_text_length,
        }
    }

    /// Syntactic email check: one `@`, non-empty local part, dotted domain,
    /// no whitespace.
    pub fn email(&self, field: &str, value: &str) -> Result<(), ApiError> {
        if value.is_empty() {
            return Err(ApiError::bad_request(format!("{} is required", field)));
        }
        if value.len() > self.max_email_length {
            return Err(ApiError::bad_request(format!(
                "{} exceeds {} bytes",
                field, self.max_email_length
            )));
        }
        if !is_email(value) {
            return Err(ApiError::bad_request(format!(
                "{} is not a valid email address",
                field
            )));
        }
        Ok(())
    }

    /// The `friends` array must name exactly two valid emails.
    pub fn friend_pair<'a>(&self, friends: &'a [String]) -> Result<(&'a str, &'a str), ApiError> {
        match friends {
            [a, b] => {
                self.email("friends[0]", a)?;
                self.email("friends[1]", b)?;
                Ok((a.as_str(), b.as_str()))
            }
            _ => Err(ApiError::bad_request(
                "exactly two email addresses are required",
            )),
        }
    }

    pub fn relation(&self, req: &RelationRequest) -> Result<(), ApiError> {
        self.email("requestor", &req.requestor)?;
        self.email("target", &req.target)
    }

    /// Update text may be empty but not oversized.
    pub fn text(&self, text: &str) -> Result<(), ApiError> {
        if text.len() > self.max_text_length {
            return Err(ApiError::bad_request(format!(
                "text exceeds {} bytes",
                self.max_text_length
            )));
        }
        Ok(())
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
