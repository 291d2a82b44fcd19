use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ecotour_domain::{Booking, CustomerDetails, NewBooking};

use crate::auth::require_admin;
use crate::availability::AvailabilityResponse;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookingRequest {
    pub tour_id: i64,
    pub seats: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub tour_id: i64,
    pub seats: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            tour_id: booking.tour_id,
            seats: booking.seats,
            customer_name: booking.customer.name,
            customer_email: booking.customer.email,
            customer_phone: booking.customer.phone,
            customer_address: booking.customer.address,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking: BookingResponse,
    pub availability: AvailabilityResponse,
}

pub fn routes() -> Router<AppState> {
    // Served with and without the /api prefix the storefront uses.
    Router::new()
        .route("/api/bookings", post(create_booking).get(list_bookings))
        .route("/bookings", post(create_booking).get(list_bookings))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), ApiError> {
    let request = NewBooking {
        tour_id: req.tour_id,
        seats: req.seats,
        customer: CustomerDetails {
            name: req.customer_name,
            email: req.customer_email,
            phone: req.customer_phone,
            address: req.customer_address,
        },
    };

    let (booking, availability) = state.bookings.create_booking(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking: booking.into(),
            availability: availability.into(),
        }),
    ))
}

/// GET /api/bookings (admin only)
async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    require_admin(&state, &headers)?;
    let bookings = state.ledger.list_bookings().await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
