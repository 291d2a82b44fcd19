use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use ecotour_domain::SeatAvailability;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub tour_id: i64,
    pub capacity: i32,
    pub booked: i32,
    pub available: i32,
}

impl From<SeatAvailability> for AvailabilityResponse {
    fn from(a: SeatAvailability) -> Self {
        Self {
            tour_id: a.tour_id,
            capacity: a.capacity,
            booked: a.booked,
            available: a.available,
        }
    }
}

pub fn routes() -> Router<AppState> {
    // Served with and without the /api prefix the storefront uses.
    Router::new()
        .route("/api/availability/{tour_id}", get(get_availability))
        .route("/availability/{tour_id}", get(get_availability))
}

/// GET /api/availability/{tour_id}
async fn get_availability(
    State(state): State<AppState>,
    Path(tour_id): Path<i64>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let availability = state.bookings.availability(tour_id).await?;
    Ok(Json(availability.into()))
}
