//! Table of audited routes
//!
//! Maps `(method, route pattern)` to an [`AuditAction`]. Patterns use the
//! router's `:name` syntax; a `:id` segment is percent-decoded and read as
//! the customer id.

use axum::http::Method;

use super::models::AuditAction;

const CUSTOMER_ID_PARAM: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct AuditRoute {
    method: Method,
    segments: Vec<Segment>,
    action: AuditAction,
}

/// What the registry knows about a matched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditMatch {
    pub action: AuditAction,
    /// Decoded `:id` parsed as an integer; `None` when absent or not numeric
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditRegistry {
    routes: Vec<AuditRoute>,
}

impl AuditRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, method: Method, pattern: &str, action: AuditAction) -> Self {
        let segments = pattern
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        self.routes.push(AuditRoute {
            method,
            segments,
            action,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First registered route matching `method` and `path` exactly.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<AuditMatch> {
        let parts: Vec<&str> = path.split('/').collect();

        self.routes
            .iter()
            .filter(|route| route.method == *method && route.segments.len() == parts.len())
            .find_map(|route| {
                let mut customer_id = None;
                for (segment, part) in route.segments.iter().zip(&parts) {
                    match segment {
                        Segment::Literal(literal) if literal == part => {},
                        Segment::Literal(_) => return None,
                        Segment::Param(_) if part.is_empty() => return None,
                        Segment::Param(name) => {
                            if name == CUSTOMER_ID_PARAM {
                                customer_id = parse_customer_id(part);
                            }
                        },
                    }
                }
                Some(AuditMatch {
                    action: route.action,
                    customer_id,
                })
            })
    }
}

/// Same decoding the router's `Path` extractor applies.
fn parse_customer_id(segment: &str) -> Option<i64> {
    urlencoding::decode(segment).ok()?.parse().ok()
}
