use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use super::queries::ListAuditEntriesQuery;
use crate::error::AppResult;
use crate::features::shared::extract::Query;
use crate::features::FeatureState;

pub fn audit_entries_routes() -> Router<FeatureState> {
    Router::new().route("/", get(list_audit_entries))
}

#[tracing::instrument(skip(state))]
async fn list_audit_entries(
    State(state): State<FeatureState>,
    Query(query): Query<ListAuditEntriesQuery>,
) -> AppResult<impl IntoResponse> {
    let page = super::queries::list::handle(state.audit_entries.as_ref(), query).await?;

    tracing::debug!(
        returned = page.content.len(),
        total = page.total_elements,
        "Audit entries listed via API"
    );

    Ok(Json(page))
}
