use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use ecotour_domain::{
    Booking, BookingError, BookingLedger, SeatAvailability, Tour, TourCatalog, TourDraft,
    TourFilter,
};

/// In-memory backend holding each tour together with its booking ledger.
///
/// A map entry is the unit of locking: `get_mut` hands out exclusive access
/// to one tour's slot, so the capacity check and the append in
/// `append_booking` happen under a single per-tour guard while other tours
/// stay independently reachable.
pub struct MemoryStore {
    slots: DashMap<i64, TourSlot>,
    next_tour_id: AtomicI64,
}

struct TourSlot {
    tour: Tour,
    bookings: Vec<Booking>,
}

impl TourSlot {
    fn booked(&self) -> i32 {
        self.bookings.iter().map(|b| b.seats).sum()
    }

    fn availability(&self) -> SeatAvailability {
        SeatAvailability::derive(self.tour.id, self.tour.capacity, self.booked())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            next_tour_id: AtomicI64::new(1),
        }
    }

    /// Seeds the demo catalog so the API is usable without a database.
    pub fn with_demo_catalog() -> Self {
        let store = Self::new();
        for (category, name, description, capacity, image) in [
            (
                "Hiking",
                "Mountain Peak Adventure",
                "Experience breathtaking views from the summit of our local mountain peaks. \
                 This guided hiking tour includes wildlife spotting and photography opportunities.",
                12,
                "/pics/1.jpg",
            ),
            (
                "Water Sports",
                "Kayaking Experience",
                "Paddle through pristine waters while observing local wildlife. Perfect for \
                 beginners and experienced kayakers alike.",
                8,
                "/pics/2.jpg",
            ),
            (
                "Wildlife",
                "Bird Watching Safari",
                "Join our expert guides for an early morning bird watching adventure. Discover \
                 rare species in their natural habitat.",
                15,
                "/pics/3.jpg",
            ),
            (
                "Hiking",
                "Forest Trail Walk",
                "Explore ancient forest trails and learn about local flora and fauna. Suitable \
                 for all fitness levels.",
                20,
                "/pics/4.jpg",
            ),
        ] {
            store.insert_tour(TourDraft {
                category: category.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                capacity,
                image: Some(image.to_string()),
            });
        }
        store
    }

    fn insert_tour(&self, draft: TourDraft) -> Tour {
        let id = self.next_tour_id.fetch_add(1, Ordering::SeqCst);
        let tour = draft.into_tour(id);
        self.slots.insert(
            id,
            TourSlot {
                tour: tour.clone(),
                bookings: Vec::new(),
            },
        );
        tour
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(tour: &Tour, filter: &TourFilter) -> bool {
    if let Some(category) = &filter.category {
        if tour.category != *category {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !needle.is_empty()
            && !tour.name.to_lowercase().contains(&needle)
            && !tour.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl TourCatalog for MemoryStore {
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, BookingError> {
        Ok(self.insert_tour(draft))
    }

    async fn get_tour(&self, tour_id: i64) -> Result<Option<Tour>, BookingError> {
        Ok(self.slots.get(&tour_id).map(|slot| slot.tour.clone()))
    }

    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>, BookingError> {
        let mut tours: Vec<Tour> = self
            .slots
            .iter()
            .filter(|slot| matches_filter(&slot.tour, filter))
            .map(|slot| slot.tour.clone())
            .collect();
        tours.sort_by_key(|t| t.id);
        Ok(tours)
    }

    async fn update_tour(
        &self,
        tour_id: i64,
        draft: TourDraft,
    ) -> Result<Option<Tour>, BookingError> {
        match self.slots.get_mut(&tour_id) {
            Some(mut slot) => {
                slot.tour = draft.into_tour(tour_id);
                Ok(Some(slot.tour.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_tour(&self, tour_id: i64) -> Result<bool, BookingError> {
        // The tour's ledger goes with it.
        Ok(self.slots.remove(&tour_id).is_some())
    }
}

#[async_trait]
impl BookingLedger for MemoryStore {
    async fn append_booking(&self, booking: Booking) -> Result<SeatAvailability, BookingError> {
        // Exclusive slot access for the whole check-then-append.
        let mut slot = self
            .slots
            .get_mut(&booking.tour_id)
            .ok_or(BookingError::TourNotFound(booking.tour_id))?;

        let current = slot.availability();
        if !current.can_accommodate(booking.seats) {
            return Err(BookingError::CapacityExceeded {
                requested: booking.seats,
                available: current.available,
            });
        }

        slot.bookings.push(booking);
        Ok(slot.availability())
    }

    async fn availability(&self, tour_id: i64) -> Result<SeatAvailability, BookingError> {
        let slot = self
            .slots
            .get(&tour_id)
            .ok_or(BookingError::TourNotFound(tour_id))?;
        Ok(slot.availability())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let mut bookings: Vec<Booking> = self
            .slots
            .iter()
            .flat_map(|slot| slot.bookings.clone())
            .collect();
        bookings.sort_by_key(|b| b.created_at);
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn draft(capacity: i32) -> TourDraft {
        TourDraft {
            category: "Hiking".to_string(),
            name: "Ridge Traverse".to_string(),
            description: "A long day above the treeline.".to_string(),
            capacity,
            image: None,
        }
    }

    fn booking(tour_id: i64, seats: i32) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tour_id,
            seats,
            customer: ecotour_domain::CustomerDetails {
                name: "Ada Fern".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Trailhead Road".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn booking_lifecycle() {
        let store = MemoryStore::new();
        let tour = store.create_tour(draft(5)).await.unwrap();

        // Fresh tour: empty ledger
        let a = store.availability(tour.id).await.unwrap();
        assert_eq!((a.capacity, a.booked, a.available), (5, 0, 5));

        // Append within capacity
        let a = store.append_booking(booking(tour.id, 3)).await.unwrap();
        assert_eq!((a.booked, a.available), (3, 2));

        // Exceeding what is left reports the current count
        let err = store.append_booking(booking(tour.id, 3)).await.unwrap_err();
        assert_eq!(
            err,
            BookingError::CapacityExceeded {
                requested: 3,
                available: 2
            }
        );

        // Booking exactly the remainder drives availability to zero
        let a = store.append_booking(booking(tour.id, 2)).await.unwrap();
        assert_eq!((a.booked, a.available), (5, 0));
    }

    #[tokio::test]
    async fn unknown_tour_is_reported() {
        let store = MemoryStore::new();
        assert_eq!(
            store.availability(99).await.unwrap_err(),
            BookingError::TourNotFound(99)
        );
        assert_eq!(
            store.append_booking(booking(99, 1)).await.unwrap_err(),
            BookingError::TourNotFound(99)
        );
    }

    #[tokio::test]
    async fn update_keeps_ledger_and_clamps_availability() {
        let store = MemoryStore::new();
        let tour = store.create_tour(draft(5)).await.unwrap();
        store.append_booking(booking(tour.id, 4)).await.unwrap();

        // Capacity lowered below the booked sum: clamped, not negative
        store.update_tour(tour.id, draft(2)).await.unwrap().unwrap();
        let a = store.availability(tour.id).await.unwrap();
        assert_eq!((a.capacity, a.booked, a.available), (2, 4, 0));
    }

    #[tokio::test]
    async fn list_tours_filters() {
        let store = MemoryStore::with_demo_catalog();

        let all = store.list_tours(&TourFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let hiking = store
            .list_tours(&TourFilter {
                category: Some("Hiking".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(hiking.len(), 2);

        let kayak = store
            .list_tours(&TourFilter {
                category: None,
                search: Some("kayak".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(kayak.len(), 1);
        assert_eq!(kayak[0].name, "Kayaking Experience");
    }

    #[tokio::test]
    async fn delete_drops_tour_and_bookings() {
        let store = MemoryStore::new();
        let tour = store.create_tour(draft(5)).await.unwrap();
        store.append_booking(booking(tour.id, 2)).await.unwrap();

        assert!(store.delete_tour(tour.id).await.unwrap());
        assert!(!store.delete_tour(tour.id).await.unwrap());
        assert!(store.list_bookings().await.unwrap().is_empty());
    }
}
