use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ecotour_domain::{Tour, TourDraft, TourFilter};

use crate::auth::require_admin;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TourPayload {
    pub category: String,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub image: Option<String>,
}

impl TourPayload {
    fn into_draft(self) -> Result<TourDraft, ApiError> {
        let draft = TourDraft {
            category: self.category,
            name: self.name,
            description: self.description,
            capacity: self.capacity,
            image: self.image,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourResponse {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub image: Option<String>,
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id,
            category: tour.category,
            name: tour.name,
            description: tour.description,
            capacity: tour.capacity,
            image: tour.image,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListToursQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tours", get(list_tours).post(create_tour))
        .route(
            "/api/tours/{id}",
            get(get_tour).put(update_tour).delete(delete_tour),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tours?category=Hiking&search=lake
async fn list_tours(
    State(state): State<AppState>,
    Query(query): Query<ListToursQuery>,
) -> Result<Json<Vec<TourResponse>>, ApiError> {
    let filter = TourFilter {
        category: query.category.filter(|c| !c.is_empty()),
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    let tours = state.catalog.list_tours(&filter).await?;
    Ok(Json(tours.into_iter().map(TourResponse::from).collect()))
}

/// GET /api/tours/{id}
async fn get_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<i64>,
) -> Result<Json<TourResponse>, ApiError> {
    let tour = state
        .catalog
        .get_tour(tour_id)
        .await?
        .ok_or_else(|| ApiError::tour_not_found(tour_id))?;
    Ok(Json(tour.into()))
}

/// POST /api/tours (admin only)
async fn create_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<TourPayload>,
) -> Result<(StatusCode, Json<TourResponse>), ApiError> {
    require_admin(&state, &headers)?;
    let draft = payload.into_draft()?;
    let tour = state.catalog.create_tour(draft).await?;
    Ok((StatusCode::CREATED, Json(tour.into())))
}

/// PUT /api/tours/{id} (admin only)
async fn update_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<i64>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<TourPayload>,
) -> Result<Json<TourResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let draft = payload.into_draft()?;
    let tour = state
        .catalog
        .update_tour(tour_id, draft)
        .await?
        .ok_or_else(|| ApiError::tour_not_found(tour_id))?;
    Ok(Json(tour.into()))
}

/// DELETE /api/tours/{id} (admin only)
async fn delete_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    if !state.catalog.delete_tour(tour_id).await? {
        return Err(ApiError::tour_not_found(tour_id));
    }
    Ok(Json(json!({"ok": true})))
}
