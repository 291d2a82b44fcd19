use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A bookable offering with a fixed seat capacity. Everything besides
/// `capacity` is display metadata the core never interprets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub image: Option<String>,
}

/// Validated payload for creating or replacing a tour. The id is assigned by
/// the store, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourDraft {
    pub category: String,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub image: Option<String>,
}

impl TourDraft {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.category.trim().is_empty() || self.category.len() > 50 {
            return Err(BookingError::InvalidInput(
                "category must be 1-50 characters".to_string(),
            ));
        }
        if self.name.trim().is_empty() || self.name.len() > 150 {
            return Err(BookingError::InvalidInput(
                "name must be 1-150 characters".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }
        if self.capacity < 0 {
            return Err(BookingError::InvalidInput(
                "capacity must be a non-negative integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_tour(self, id: i64) -> Tour {
        Tour {
            id,
            category: self.category,
            name: self.name,
            description: self.description,
            capacity: self.capacity,
            image: self.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TourDraft {
        TourDraft {
            category: "Hiking".to_string(),
            name: "Ridge Traverse".to_string(),
            description: "A long day above the treeline.".to_string(),
            capacity: 12,
            image: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(matches!(d.validate(), Err(BookingError::InvalidInput(_))));
    }

    #[test]
    fn oversized_category_rejected() {
        let mut d = draft();
        d.category = "x".repeat(51);
        assert!(d.validate().is_err());
    }

    #[test]
    fn negative_capacity_rejected() {
        let mut d = draft();
        d.capacity = -1;
        assert!(d.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_allowed() {
        let mut d = draft();
        d.capacity = 0;
        assert!(d.validate().is_ok());
    }
}
