use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};

use super::{
    queries::ListCustomersQuery,
    types::{CustomerPayload, CustomerResponse},
};
use crate::audit::AuditContext;
use crate::error::AppResult;
use crate::features::shared::extract::{Path, Query, ValidatedJson};
use crate::features::FeatureState;

pub fn customers_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

fn request_id(audit: &Option<Extension<AuditContext>>) -> Option<String> {
    audit.as_ref().map(|Extension(ctx)| ctx.request_id.to_string())
}

#[tracing::instrument(skip_all)]
async fn create_customer(
    State(state): State<FeatureState>,
    audit: Option<Extension<AuditContext>>,
    ValidatedJson(input): ValidatedJson<CustomerPayload>,
) -> AppResult<Response> {
    let customer = super::commands::create::handle(state.customers.as_ref(), input).await?;

    tracing::info!(
        customer_id = customer.id,
        request_id = ?request_id(&audit),
        "Customer created via API"
    );

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))).into_response())
}

#[tracing::instrument(skip(state))]
async fn list_customers(
    State(state): State<FeatureState>,
    Query(query): Query<ListCustomersQuery>,
) -> AppResult<Response> {
    let page = super::queries::list::handle(state.customers.as_ref(), query).await?;

    tracing::debug!(
        returned = page.content.len(),
        total = page.total_elements,
        "Customers listed via API"
    );

    Ok(Json(page.map(CustomerResponse::from)).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_customer(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let customer = super::queries::get::handle(state.customers.as_ref(), id).await?;

    Ok(Json(CustomerResponse::from(customer)).into_response())
}

#[tracing::instrument(skip(state, audit, input))]
async fn update_customer(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    audit: Option<Extension<AuditContext>>,
    ValidatedJson(input): ValidatedJson<CustomerPayload>,
) -> AppResult<Response> {
    let customer = super::commands::update::handle(state.customers.as_ref(), id, input).await?;

    tracing::info!(
        customer_id = customer.id,
        request_id = ?request_id(&audit),
        "Customer updated via API"
    );

    Ok(Json(CustomerResponse::from(customer)).into_response())
}

#[tracing::instrument(skip(state, audit))]
async fn delete_customer(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    audit: Option<Extension<AuditContext>>,
) -> AppResult<Response> {
    super::commands::delete::handle(state.customers.as_ref(), id).await?;

    tracing::info!(customer_id = id, request_id = ?request_id(&audit), "Customer deleted via API");

    Ok(StatusCode::NO_CONTENT.into_response())
}
