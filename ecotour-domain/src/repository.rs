use async_trait::async_trait;

use crate::availability::SeatAvailability;
use crate::booking::Booking;
use crate::error::BookingError;
use crate::tour::{Tour, TourDraft};

/// Catalog listing filter. `category` matches exactly; `search` matches a
/// case-insensitive substring of the name or description.
#[derive(Debug, Clone, Default)]
pub struct TourFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Read/write access to tour records. Administration only ever touches the
/// catalog; the booking side reads capacity through [`BookingLedger`].
#[async_trait]
pub trait TourCatalog: Send + Sync {
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, BookingError>;

    async fn get_tour(&self, tour_id: i64) -> Result<Option<Tour>, BookingError>;

    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>, BookingError>;

    /// Replaces the tour's fields, keeping its id and bookings. Returns
    /// `None` for an unknown tour.
    async fn update_tour(&self, tour_id: i64, draft: TourDraft)
        -> Result<Option<Tour>, BookingError>;

    /// Removes the tour and its bookings. Returns whether anything existed.
    async fn delete_tour(&self, tour_id: i64) -> Result<bool, BookingError>;
}

/// The append-only record of confirmed bookings, plus the seat counts
/// derived from it.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Appends `booking` if its tour still has room for `booking.seats`,
    /// returning the post-append availability.
    ///
    /// The capacity check and the append form a single critical section per
    /// tour: two concurrent appends against one tour can never both pass on
    /// a stale read of the booked sum. Appends against different tours do
    /// not serialize against each other.
    async fn append_booking(&self, booking: Booking) -> Result<SeatAvailability, BookingError>;

    /// Pure read; no side effects.
    async fn availability(&self, tour_id: i64) -> Result<SeatAvailability, BookingError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError>;
}
