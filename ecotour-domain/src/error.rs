use thiserror::Error;

/// Failure modes surfaced by the booking core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Malformed or missing request fields. The caller corrects its input;
    /// never retried as-is.
    #[error("{0}")]
    InvalidInput(String),

    /// The referenced tour does not exist.
    #[error("Tour {0} not found")]
    TourNotFound(i64),

    /// Requested seats exceed what is left on the tour. Carries the current
    /// count so callers can offer a corrected request.
    #[error("Only {available} seat(s) left")]
    CapacityExceeded { requested: i32, available: i32 },

    /// The underlying store failed mid-operation. Nothing was written, so
    /// retrying the whole operation is safe.
    #[error("store failure: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::BookingError;

    #[test]
    fn capacity_exceeded_names_the_remaining_count() {
        let err = BookingError::CapacityExceeded { requested: 7, available: 6 };
        assert_eq!(err.to_string(), "Only 6 seat(s) left");
    }

    #[test]
    fn not_found_names_the_tour() {
        assert_eq!(BookingError::TourNotFound(42).to_string(), "Tour 42 not found");
    }
}
