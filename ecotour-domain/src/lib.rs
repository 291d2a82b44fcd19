pub mod availability;
pub mod booking;
pub mod error;
pub mod repository;
pub mod service;
pub mod tour;

pub use availability::SeatAvailability;
pub use booking::{Booking, CustomerDetails, NewBooking};
pub use error::BookingError;
pub use repository::{BookingLedger, TourCatalog, TourFilter};
pub use service::BookingService;
pub use tour::{Tour, TourDraft};
