use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::availability::SeatAvailability;
use crate::booking::{Booking, NewBooking};
use crate::error::BookingError;
use crate::repository::BookingLedger;

/// The booking core's public contract: validates a create request, then
/// hands the admission decision to the ledger's atomic append. Holds an
/// injected data-access handle rather than any ambient store reference.
pub struct BookingService {
    ledger: Arc<dyn BookingLedger>,
}

impl BookingService {
    pub fn new(ledger: Arc<dyn BookingLedger>) -> Self {
        Self { ledger }
    }

    pub async fn availability(&self, tour_id: i64) -> Result<SeatAvailability, BookingError> {
        self.ledger.availability(tour_id).await
    }

    /// Creates exactly one booking or changes nothing. Failures report, in
    /// order: unknown tour, invalid seat count, invalid customer details,
    /// insufficient availability.
    pub async fn create_booking(
        &self,
        request: NewBooking,
    ) -> Result<(Booking, SeatAvailability), BookingError> {
        // 1. The tour must exist before anything else is reported.
        self.ledger.availability(request.tour_id).await?;

        // 2. Seats must be a positive count.
        if request.seats < 1 {
            return Err(BookingError::InvalidInput(
                "seats must be a positive integer".to_string(),
            ));
        }

        // 3. Customer details must be present and plausibly shaped.
        request.customer.validate()?;

        // 4. Admission. The ledger re-checks capacity inside its per-tour
        //    critical section, so the read above going stale cannot oversell.
        let booking = Booking {
            id: Uuid::new_v4(),
            tour_id: request.tour_id,
            seats: request.seats,
            customer: request.customer,
            created_at: Utc::now(),
        };
        let availability = self.ledger.append_booking(booking.clone()).await?;

        info!(
            "Booking confirmed: {} ({} seat(s) on tour {}, {} left)",
            booking.id, booking.seats, booking.tour_id, availability.available
        );

        Ok((booking, availability))
    }
}
