use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A confirmed reservation of seats against one tour. Bookings are created
/// exactly once and never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub tour_id: i64,
    pub seats: i32,
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

/// Input to the booking service's create operation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub tour_id: i64,
    pub seats: i32,
    pub customer: CustomerDetails,
}

impl CustomerDetails {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.name.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                "customer name must not be empty".to_string(),
            ));
        }
        if !plausible_email(&self.email) {
            return Err(BookingError::InvalidInput(
                "customer email is not a valid email address".to_string(),
            ));
        }
        if self.phone.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                "customer phone must not be empty".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                "customer address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shape check only: one '@', a non-empty local part, a dotted domain.
fn plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ada Fern".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Trailhead Road".to_string(),
        }
    }

    #[test]
    fn complete_details_pass() {
        assert!(customer().validate().is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(plausible_email("ada@example.com"));
        assert!(plausible_email("a.b+c@mail.example.org"));
        assert!(!plausible_email("not-an-email"));
        assert!(!plausible_email("@example.com"));
        assert!(!plausible_email("ada@example"));
        assert!(!plausible_email("ada@.com"));
        assert!(!plausible_email("ada@example.com."));
        assert!(!plausible_email("ada@ex@ample.com"));
    }

    #[test]
    fn missing_fields_rejected() {
        for field in ["name", "email", "phone", "address"] {
            let mut c = customer();
            match field {
                "name" => c.name.clear(),
                "email" => c.email.clear(),
                "phone" => c.phone.clear(),
                _ => c.address.clear(),
            }
            assert!(
                matches!(c.validate(), Err(BookingError::InvalidInput(_))),
                "blank {field} should be rejected"
            );
        }
    }
}
