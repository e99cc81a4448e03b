//! Test helpers for CRM server integration tests
//!
//! - Fixture builders for customer input
//! - A fully layered application router over a test database
//! - A small request helper returning status and JSON body

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use crm_server::api::create_router;
use crm_server::config::Config;
use crm_server::db::{PgAuditRepository, PgCustomerRepository};
use crm_server::features::FeatureState;
use crm_server::models::{CustomerInput, Gender};

/// Builder for [`CustomerInput`] with sensible defaults.
pub struct CustomerFixture {
    input: CustomerInput,
}

impl CustomerFixture {
    pub fn new(name: &str) -> Self {
        Self {
            input: CustomerInput {
                name: name.to_string(),
                age: 30,
                date_of_birth: NaiveDate::from_ymd_opt(1993, 1, 1).unwrap(),
                address: None,
                gender: None,
            },
        }
    }

    pub fn age(mut self, age: i32) -> Self {
        self.input.age = age;
        self
    }

    pub fn born(mut self, year: i32, month: u32, day: u32) -> Self {
        self.input.date_of_birth = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.input.address = Some(address.to_string());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.input.gender = Some(gender);
        self
    }

    pub fn build(self) -> CustomerInput {
        self.input
    }
}

pub fn feature_state(pool: &PgPool) -> FeatureState {
    FeatureState {
        customers: Arc::new(PgCustomerRepository::new(pool.clone())),
        audit_entries: Arc::new(PgAuditRepository::new(pool.clone())),
    }
}

/// The production router, middleware included, over `pool`.
pub fn test_app(pool: &PgPool) -> Router {
    create_router(feature_state(pool), &Config::default())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|value| value.to_string());
    send_raw(app, method, uri, body.as_deref()).await
}

/// Like [`send`], but the body goes out byte for byte.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        },
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
