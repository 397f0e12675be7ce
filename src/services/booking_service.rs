use crate::models::admin::StaffBookingResponse;
use crate::models::booking::{Booking, BookingRequest, BookingResponse, BookingStatus};
use crate::models::event::{Event, EventStatus};
use crate::utils::error::{AppError, AppResult};
use log::info;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use uuid::Uuid;

// Attempts to mint a reference before giving up on the UNIQUE constraint
const REFERENCE_ATTEMPTS: usize = 3;

const BOOKING_DETAIL_SQL: &str = "SELECT b.id, b.booking_reference, e.title AS event_title, e.venue, e.event_date,
        b.number_of_tickets, b.total_amount, b.status, b.booking_date
 FROM bookings b
 JOIN events e ON e.id = b.event_id";

const STAFF_BOOKING_SQL: &str = "SELECT b.id, b.booking_reference, b.user_id, u.username, b.event_id,
        e.title AS event_title, b.number_of_tickets, b.total_amount, b.status, b.booking_date
 FROM bookings b
 JOIN users u ON u.id = b.user_id
 JOIN events e ON e.id = b.event_id";

#[derive(Clone)]
pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        BookingService { pool }
    }

    /// Book tickets for an event. The seat decrement is a single conditional
    /// UPDATE, so two buyers can never take the same seat: whichever
    /// statement runs second either sees enough seats left or matches no row.
    pub async fn create_booking(
        &self,
        user_id: i64,
        request: BookingRequest,
    ) -> AppResult<BookingResponse> {
        let user: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        let mut tx = self.pool.begin().await?;

        // The decrement is the first statement of the transaction, so the
        // write lock is taken before any snapshot is read.
        let updated = sqlx::query(
            "UPDATE events SET available_seats = available_seats - ?1
             WHERE id = ?2 AND status = ?3 AND available_seats >= ?1",
        )
        .bind(request.number_of_tickets)
        .bind(request.event_id)
        .bind(EventStatus::Active.to_string())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(self.classify_booking_rejection(&request).await?);
        }

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(request.event_id)
            .fetch_one(&mut *tx)
            .await?;

        let total_amount = event.price * Decimal::from(request.number_of_tickets);
        let booking_date = chrono::Utc::now().naive_utc();

        let mut created: Option<(i64, String)> = None;
        for _ in 0..REFERENCE_ATTEMPTS {
            let reference = generate_booking_reference();
            let inserted = sqlx::query(
                "INSERT INTO bookings (booking_reference, user_id, event_id, number_of_tickets, total_amount, status, booking_date)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&reference)
            .bind(user_id)
            .bind(event.id)
            .bind(request.number_of_tickets)
            .bind(total_amount.to_string())
            .bind(BookingStatus::Confirmed.to_string())
            .bind(booking_date)
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(result) => {
                    created = Some((result.last_insert_rowid(), reference));
                    break;
                }
                Err(e) if is_reference_collision(&e) => continue,
                Err(e) => {
                    tx.rollback().await?;
                    return Err(e.into());
                }
            }
        }

        let Some((booking_id, reference)) = created else {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Could not allocate a unique booking reference".into(),
            ));
        };

        tx.commit().await?;
        info!(
            "booking {} confirmed: {} x{} for user {}",
            reference, event.title, request.number_of_tickets, user_id
        );

        Ok(BookingResponse {
            id: booking_id,
            booking_reference: reference,
            event_title: event.title,
            venue: event.venue,
            event_date: event.event_date,
            number_of_tickets: request.number_of_tickets,
            total_amount,
            status: BookingStatus::Confirmed,
            booking_date,
        })
    }

    // The guarded UPDATE matched nothing; look at the event to say why
    async fn classify_booking_rejection(&self, request: &BookingRequest) -> AppResult<AppError> {
        let event: Option<(String, i64)> =
            sqlx::query_as("SELECT status, available_seats FROM events WHERE id = ?")
                .bind(request.event_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(match event {
            None => AppError::NotFound("Event not found".into()),
            Some((status, _)) if status != EventStatus::Active.to_string() => {
                AppError::BadRequest("Event is not open for booking".into())
            }
            Some((_, available)) => AppError::BadRequest(format!(
                "Not enough available seats: requested {}, available {}",
                request.number_of_tickets, available
            )),
        })
    }

    /// Cancel a booking owned by `user_id` and release its seats. The seat
    /// restore is guarded so availability can never exceed total capacity.
    pub async fn cancel_booking(&self, user_id: i64, booking_id: i64) -> AppResult<BookingResponse> {
        let mut tx = self.pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE bookings SET status = ?
             WHERE id = ? AND user_id = ? AND status IN (?, ?)",
        )
        .bind(BookingStatus::Cancelled.to_string())
        .bind(booking_id)
        .bind(user_id)
        .bind(BookingStatus::Pending.to_string())
        .bind(BookingStatus::Confirmed.to_string())
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(self.classify_cancel_rejection(user_id, booking_id).await?);
        }

        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_one(&mut *tx)
            .await?;

        let restored = sqlx::query(
            "UPDATE events SET available_seats = available_seats + ?1
             WHERE id = ?2 AND available_seats + ?1 <= total_seats",
        )
        .bind(booking.number_of_tickets)
        .bind(booking.event_id)
        .execute(&mut *tx)
        .await?;

        if restored.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Releasing these seats would exceed event capacity".into(),
            ));
        }

        let response = sqlx::query_as::<_, BookingResponse>(
            &format!("{} WHERE b.id = ?", BOOKING_DETAIL_SQL),
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("booking {} cancelled by user {}", booking.booking_reference, user_id);
        Ok(response)
    }

    async fn classify_cancel_rejection(&self, user_id: i64, booking_id: i64) -> AppResult<AppError> {
        let booking: Option<(i64, String)> =
            sqlx::query_as("SELECT user_id, status FROM bookings WHERE id = ?")
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(match booking {
            None => AppError::NotFound("Booking not found".into()),
            Some((owner, _)) if owner != user_id => {
                AppError::Forbidden("You can only cancel your own bookings".into())
            }
            Some(_) => AppError::BadRequest(
                "Only pending or confirmed bookings can be cancelled".into(),
            ),
        })
    }

    pub async fn get_user_bookings(&self, user_id: i64) -> AppResult<Vec<BookingResponse>> {
        let bookings = sqlx::query_as::<_, BookingResponse>(&format!(
            "{} WHERE b.user_id = ? ORDER BY b.booking_date DESC",
            BOOKING_DETAIL_SQL
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    pub async fn get_booking_by_reference(&self, reference: &str) -> AppResult<BookingResponse> {
        sqlx::query_as::<_, BookingResponse>(&format!(
            "{} WHERE b.booking_reference = ?",
            BOOKING_DETAIL_SQL
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_all_bookings(&self) -> AppResult<Vec<StaffBookingResponse>> {
        let bookings = sqlx::query_as::<_, StaffBookingResponse>(&format!(
            "{} ORDER BY b.booking_date DESC",
            STAFF_BOOKING_SQL
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    pub async fn get_staff_booking_by_reference(
        &self,
        reference: &str,
    ) -> AppResult<StaffBookingResponse> {
        sqlx::query_as::<_, StaffBookingResponse>(&format!(
            "{} WHERE b.booking_reference = ?",
            STAFF_BOOKING_SQL
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> AppResult<Vec<StaffBookingResponse>> {
        let bookings = sqlx::query_as::<_, StaffBookingResponse>(&format!(
            "{} WHERE b.status = ? ORDER BY b.booking_date DESC",
            STAFF_BOOKING_SQL
        ))
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Staff-side status change. Moving a live booking to CANCELLED releases
    /// its seats; a cancelled booking cannot come back to life because the
    /// seats may already be sold again.
    pub async fn update_booking_status(
        &self,
        booking_id: i64,
        new_status: BookingStatus,
    ) -> AppResult<StaffBookingResponse> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::BadRequest(
                "Cancelled bookings cannot change status".into(),
            ));
        }

        if new_status == BookingStatus::Cancelled {
            let mut tx = self.pool.begin().await?;

            // Guarded again inside the transaction in case another cancel
            // already released the seats
            let flipped = sqlx::query(
                "UPDATE bookings SET status = ?1 WHERE id = ?2 AND status != ?1",
            )
            .bind(BookingStatus::Cancelled.to_string())
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;
            if flipped.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::BadRequest(
                    "Cancelled bookings cannot change status".into(),
                ));
            }

            let restored = sqlx::query(
                "UPDATE events SET available_seats = available_seats + ?1
                 WHERE id = ?2 AND available_seats + ?1 <= total_seats",
            )
            .bind(booking.number_of_tickets)
            .bind(booking.event_id)
            .execute(&mut *tx)
            .await?;
            if restored.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::Conflict(
                    "Releasing these seats would exceed event capacity".into(),
                ));
            }

            tx.commit().await?;
        } else {
            sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
                .bind(new_status.to_string())
                .bind(booking_id)
                .execute(&self.pool)
                .await?;
        }

        info!("booking {} moved to {}", booking.booking_reference, new_status);
        self.get_staff_booking(booking_id).await
    }

    pub async fn delete_booking(&self, booking_id: i64) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn get_staff_booking(&self, booking_id: i64) -> AppResult<StaffBookingResponse> {
        sqlx::query_as::<_, StaffBookingResponse>(&format!(
            "{} WHERE b.id = ?",
            STAFF_BOOKING_SQL
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }
}

// "BK-" followed by eight hex characters from a fresh UUID
pub fn generate_booking_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("BK-{}", id[..8].to_uppercase())
}

fn is_reference_collision(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|e| e.message().contains("bookings.booking_reference"))
}
