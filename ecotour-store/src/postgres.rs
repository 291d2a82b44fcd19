use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use ecotour_domain::{
    Booking, BookingError, BookingLedger, CustomerDetails, SeatAvailability, Tour, TourCatalog,
    TourDraft, TourFilter,
};

/// Postgres backend. The booking append runs inside a transaction that takes
/// a `FOR UPDATE` row lock on the tour, serializing check-then-append per
/// tour while leaving other tours' rows unlocked.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TourRow {
    id: i64,
    category: String,
    name: String,
    description: String,
    capacity: i32,
    image: Option<String>,
}

impl From<TourRow> for Tour {
    fn from(row: TourRow) -> Self {
        Tour {
            id: row.id,
            category: row.category,
            name: row.name,
            description: row.description,
            capacity: row.capacity,
            image: row.image,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    tour_id: i64,
    seats: i32,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_address: String,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            tour_id: row.tour_id,
            seats: row.seats,
            customer: CustomerDetails {
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
                address: row.customer_address,
            },
            created_at: row.created_at,
        }
    }
}

fn store_err(err: sqlx::Error) -> BookingError {
    BookingError::Store(err.to_string())
}

async fn booked_seats<'e, E>(executor: E, tour_id: i64) -> Result<i32, BookingError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let booked: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(seats), 0)::BIGINT FROM bookings WHERE tour_id = $1",
    )
    .bind(tour_id)
    .fetch_one(executor)
    .await
    .map_err(store_err)?;

    Ok(i32::try_from(booked).unwrap_or(i32::MAX))
}

#[async_trait]
impl TourCatalog for PgStore {
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, BookingError> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            INSERT INTO tours (category, name, description, capacity, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, category, name, description, capacity, image
            "#,
        )
        .bind(&draft.category)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.capacity)
        .bind(&draft.image)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.into())
    }

    async fn get_tour(&self, tour_id: i64) -> Result<Option<Tour>, BookingError> {
        let row = sqlx::query_as::<_, TourRow>(
            "SELECT id, category, name, description, capacity, image FROM tours WHERE id = $1",
        )
        .bind(tour_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Tour::from))
    }

    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>, BookingError> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));
        let rows = sqlx::query_as::<_, TourRow>(
            r#"
            SELECT id, category, name, description, capacity, image
            FROM tours
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 OR description ILIKE $2)
            ORDER BY id
            "#,
        )
        .bind(&filter.category)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(Tour::from).collect())
    }

    async fn update_tour(
        &self,
        tour_id: i64,
        draft: TourDraft,
    ) -> Result<Option<Tour>, BookingError> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            UPDATE tours
            SET category = $2, name = $3, description = $4, capacity = $5, image = $6
            WHERE id = $1
            RETURNING id, category, name, description, capacity, image
            "#,
        )
        .bind(tour_id)
        .bind(&draft.category)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.capacity)
        .bind(&draft.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Tour::from))
    }

    async fn delete_tour(&self, tour_id: i64) -> Result<bool, BookingError> {
        // Bookings go with the tour via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(tour_id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BookingLedger for PgStore {
    async fn append_booking(&self, booking: Booking) -> Result<SeatAvailability, BookingError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        // Row lock on the tour serializes concurrent appends for it. A
        // dropped or failed transaction rolls back with nothing written.
        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM tours WHERE id = $1 FOR UPDATE")
                .bind(booking.tour_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(store_err)?;
        let capacity = capacity.ok_or(BookingError::TourNotFound(booking.tour_id))?;

        let booked = booked_seats(&mut *tx, booking.tour_id).await?;
        let current = SeatAvailability::derive(booking.tour_id, capacity, booked);
        if !current.can_accommodate(booking.seats) {
            return Err(BookingError::CapacityExceeded {
                requested: booking.seats,
                available: current.available,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, tour_id, seats, customer_name, customer_email, customer_phone, customer_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id)
        .bind(booking.tour_id)
        .bind(booking.seats)
        .bind(&booking.customer.name)
        .bind(&booking.customer.email)
        .bind(&booking.customer.phone)
        .bind(&booking.customer.address)
        .bind(booking.created_at)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(SeatAvailability::derive(
            booking.tour_id,
            capacity,
            booked + booking.seats,
        ))
    }

    async fn availability(&self, tour_id: i64) -> Result<SeatAvailability, BookingError> {
        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM tours WHERE id = $1")
                .bind(tour_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;
        let capacity = capacity.ok_or(BookingError::TourNotFound(tour_id))?;

        let booked = booked_seats(&self.pool, tour_id).await?;
        Ok(SeatAvailability::derive(tour_id, capacity, booked))
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, tour_id, seats, customer_name, customer_email, customer_phone,
                   customer_address, created_at
            FROM bookings
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
