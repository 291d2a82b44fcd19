use std::sync::Arc;

use ecotour_domain::{BookingLedger, BookingService, TourCatalog};

#[derive(Clone)]
pub struct AdminConfig {
    pub secret: String,
}

/// Shared handler state: the injected data-access handles and the booking
/// service built on top of them.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn TourCatalog>,
    pub ledger: Arc<dyn BookingLedger>,
    pub bookings: Arc<BookingService>,
    pub admin: AdminConfig,
}
