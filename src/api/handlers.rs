use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Phone, UsageCategory, UserPreference},
    services::{paginate, Cursor, Recommendation, UsageStrategy},
};

use super::AppState;

/// Default page size for catalog listings
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Largest page a client may request
pub const MAX_PAGE_LIMIT: usize = 100;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub min_budget: f64,
    pub max_budget: f64,
    #[serde(default)]
    pub os: Option<String>,
    /// Usage selector 1-5; anything else means casual
    pub usage_choice: i64,
}

#[derive(Debug, Deserialize)]
pub struct PhoneListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneListResponse {
    pub phones: Vec<Phone>,
    pub next_offset: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Main, additional and bonus recommendations for one set of preferences
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Recommendation>> {
    for (name, value) in [("minBudget", query.min_budget), ("maxBudget", query.max_budget)] {
        if !value.is_finite() {
            return Err(AppError::InvalidInput(format!("{name} must be a finite number")));
        }
    }

    let usage = UsageCategory::from_selector(query.usage_choice);
    let pref = UserPreference::from_selection(
        usage,
        query.min_budget,
        query.max_budget,
        query.os.as_deref(),
    );
    let strategy = UsageStrategy::from(usage);

    tracing::info!(
        request_id = %request_id,
        usage_choice = query.usage_choice,
        preference = %pref,
        "Processing recommendation request"
    );

    let result = state.engine().run(&pref, &strategy);
    Ok(Json(result))
}

/// Pages through the full catalog
pub async fn list_phones(
    State(state): State<AppState>,
    Query(query): Query<PhoneListQuery>,
) -> AppResult<Json<PhoneListResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    let cursor = Cursor(query.offset.unwrap_or_default());
    let page = paginate(state.catalog.phones(), cursor, limit);

    Ok(Json(PhoneListResponse {
        phones: page.items,
        next_offset: page.next.map(|c| c.0),
    }))
}
