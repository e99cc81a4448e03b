//! Audit capture middleware
//!
//! For every request the [`AuditRegistry`] recognises, the layer:
//! - buffers the body (up to a byte limit) and hands an identical copy on
//! - builds an [`AuditContext`] and puts it in the request extensions
//! - waits for the inner service, classifies the outcome and appends
//!   exactly one audit entry
//!
//! Everything else passes straight through. The layer must sit outside the
//! panic catcher so a panicking handler is still recorded as `FAILED`.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use super::models::{AuditAction, AuditStatus, NewAuditEntry};
use super::recorder::record_audit_entry;
use super::registry::AuditRegistry;
use crate::db::AuditRepository;
use crate::error::{AppError, RecordedError};

/// Per-request audit state, visible to handlers as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    /// Correlates log lines of one audited request
    pub request_id: Uuid,
    pub action: AuditAction,
    pub customer_id: Option<i64>,
    /// Compacted body snapshot
    pub request_body: Option<String>,
}

impl AuditContext {
    pub fn entry(&self, status: AuditStatus) -> NewAuditEntry {
        NewAuditEntry::new(self.action, status)
            .customer_id(self.customer_id)
            .request(self.request_body.clone())
    }
}

#[derive(Clone)]
pub struct AuditLayer {
    repository: Arc<dyn AuditRepository>,
    registry: Arc<AuditRegistry>,
    max_body_bytes: usize,
}

impl AuditLayer {
    pub fn new(
        repository: Arc<dyn AuditRepository>,
        registry: AuditRegistry,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            repository,
            registry: Arc::new(registry),
            max_body_bytes,
        }
    }
}

impl<S> Layer<S> for AuditLayer {
    type Service = AuditMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuditMiddleware {
            inner,
            repository: self.repository.clone(),
            registry: self.registry.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[derive(Clone)]
pub struct AuditMiddleware<S> {
    inner: S,
    repository: Arc<dyn AuditRepository>,
    registry: Arc<AuditRegistry>,
    max_body_bytes: usize,
}

impl<S> Service<Request> for AuditMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Take the service that was driven to readiness, leave a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let Some(matched) = self.registry.resolve(request.method(), request.uri().path()) else {
            return Box::pin(inner.call(request));
        };

        let repository = self.repository.clone();
        let max_body_bytes = self.max_body_bytes;
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "audit",
            %request_id,
            action = matched.action.as_str(),
            customer_id = ?matched.customer_id,
        );

        Box::pin(
            async move {
                let (mut parts, body) = request.into_parts();

                let bytes = match Limited::new(body, max_body_bytes).collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(e) => {
                        let error = if e.downcast_ref::<LengthLimitError>().is_some() {
                            AppError::PayloadTooLarge {
                                limit: max_body_bytes,
                            }
                        } else {
                            AppError::BadRequest("Request body could not be read".to_string())
                        };
                        warn!(error = %e, "Failed to buffer request body");

                        let entry = NewAuditEntry::new(matched.action, AuditStatus::Failed)
                            .customer_id(matched.customer_id);
                        record_audit_entry(repository.as_ref(), entry).await;
                        return Ok(error.into_response());
                    },
                };

                let context = AuditContext {
                    request_id,
                    action: matched.action,
                    customer_id: matched.customer_id,
                    request_body: body_snapshot(&bytes),
                };
                debug!(body_size = bytes.len(), "Auditable request received");

                parts.extensions.insert(context.clone());
                let request = Request::from_parts(parts, Body::from(bytes));

                let result = inner.call(request).await;

                let status = match &result {
                    Ok(response) => classify(response),
                    Err(e) => {
                        warn!(error = %e, "Inner service failed");
                        AuditStatus::Failed
                    },
                };
                record_audit_entry(repository.as_ref(), context.entry(status)).await;

                result
            }
            .instrument(span),
        )
    }
}

/// `FAILED` when the response carries a [`RecordedError`] or a 4xx/5xx
/// status, `SUCCESS` otherwise.
pub fn classify(response: &Response) -> AuditStatus {
    let status = response.status();
    if response.extensions().get::<RecordedError>().is_some()
        || status.is_client_error()
        || status.is_server_error()
    {
        AuditStatus::Failed
    } else {
        AuditStatus::Success
    }
}

/// Stored form of a request body.
///
/// Valid JSON loses insignificant whitespace (string contents are kept
/// verbatim); anything else is trimmed. Empty results become `None`.
/// Raw NUL characters are written as `\u0000`; TEXT columns reject them.
pub fn body_snapshot(bytes: &Bytes) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let snapshot = if serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok() {
        compact_json(trimmed)
    } else {
        trimmed.to_string()
    };

    Some(snapshot.replace('\0', "\\u0000"))
}

fn compact_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !c.is_whitespace() {
            out.push(c);
        }
    }

    out
}
