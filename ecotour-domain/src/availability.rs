use serde::{Deserialize, Serialize};

/// Seat arithmetic for one tour, derived from the catalog capacity and the
/// ledger's booked sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAvailability {
    pub tour_id: i64,
    pub capacity: i32,
    pub booked: i32,
    pub available: i32,
}

impl SeatAvailability {
    /// `available` clamps at zero: a capacity lowered below the booked sum
    /// reads as sold out, never as a negative count.
    pub fn derive(tour_id: i64, capacity: i32, booked: i32) -> Self {
        Self {
            tour_id,
            capacity,
            booked,
            available: (capacity - booked).max(0),
        }
    }

    pub fn can_accommodate(&self, seats: i32) -> bool {
        seats <= self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_means_full_availability() {
        let a = SeatAvailability::derive(1, 10, 0);
        assert_eq!(a.booked, 0);
        assert_eq!(a.available, 10);
    }

    #[test]
    fn booked_seats_reduce_availability() {
        let a = SeatAvailability::derive(1, 10, 4);
        assert_eq!(a.available, 6);
        assert!(a.can_accommodate(6));
        assert!(!a.can_accommodate(7));
    }

    #[test]
    fn full_tour_accommodates_nothing() {
        let a = SeatAvailability::derive(1, 5, 5);
        assert_eq!(a.available, 0);
        assert!(!a.can_accommodate(1));
    }

    #[test]
    fn capacity_below_booked_clamps_to_zero() {
        // Capacity lowered to 2 while 4 seats are already booked.
        let a = SeatAvailability::derive(1, 2, 4);
        assert_eq!(a.capacity, 2);
        assert_eq!(a.booked, 4);
        assert_eq!(a.available, 0);
    }
}
