use crate::models::event::{
    Event, EventCreateRequest, EventResponse, EventStatsResponse, EventStatus, EventUpdateRequest,
};
use crate::utils::error::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use log::info;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct EventService {
    pool: SqlitePool,
}

impl EventService {
    pub fn new(pool: SqlitePool) -> Self {
        EventService { pool }
    }

    pub async fn create_event(&self, request: EventCreateRequest) -> AppResult<EventResponse> {
        if request.price <= Decimal::ZERO {
            return Err(AppError::ValidationError("Price must be positive".into()));
        }
        if let Some(league_id) = request.league_id {
            let league: Option<i64> = sqlx::query_scalar("SELECT id FROM leagues WHERE id = ?")
                .bind(league_id)
                .fetch_optional(&self.pool)
                .await?;
            if league.is_none() {
                return Err(AppError::NotFound("League not found".into()));
            }
        }

        // A new event starts fully available
        let result = sqlx::query(
            "INSERT INTO events (title, description, venue, event_date, total_seats, available_seats, price, status, league_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.venue)
        .bind(request.event_date)
        .bind(request.total_seats)
        .bind(request.total_seats)
        .bind(request.price.to_string())
        .bind(EventStatus::Active.to_string())
        .bind(request.league_id)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        info!("created event {} ({})", result.last_insert_rowid(), request.title);
        self.get_event_by_id(result.last_insert_rowid()).await
    }

    pub async fn get_all_events(&self) -> AppResult<Vec<EventResponse>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date")
            .fetch_all(&self.pool)
            .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    pub async fn get_upcoming_events(&self) -> AppResult<Vec<EventResponse>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE event_date > ? AND status = ? ORDER BY event_date",
        )
        .bind(Utc::now().naive_utc())
        .bind(EventStatus::Active.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// The first three upcoming events, as shown on the landing page.
    pub async fn get_featured_events(&self) -> AppResult<Vec<EventResponse>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE event_date > ? AND status = ? ORDER BY event_date LIMIT 3",
        )
        .bind(Utc::now().naive_utc())
        .bind(EventStatus::Active.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    pub async fn search_events(
        &self,
        query: Option<String>,
        venue: Option<String>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<EventResponse>> {
        let title_pattern = query.map(|q| format!("%{}%", q));
        let venue_pattern = venue.map(|v| format!("%{}%", v));
        let date_string = date.map(|d| d.to_string());

        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events
             WHERE (?1 IS NULL OR title LIKE ?1)
               AND (?2 IS NULL OR venue LIKE ?2)
               AND (?3 IS NULL OR date(event_date) = ?3)
             ORDER BY event_date",
        )
        .bind(title_pattern)
        .bind(venue_pattern)
        .bind(date_string)
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    pub async fn get_events_by_league(&self, league_id: i64) -> AppResult<Vec<EventResponse>> {
        let league: Option<i64> = sqlx::query_scalar("SELECT id FROM leagues WHERE id = ?")
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await?;
        if league.is_none() {
            return Err(AppError::NotFound("League not found".into()));
        }

        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE league_id = ? ORDER BY event_date",
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    pub async fn get_event_by_id(&self, event_id: i64) -> AppResult<EventResponse> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
        Ok(event.into())
    }

    /// Apply a partial update. Changing total_seats moves available_seats by
    /// the same delta; a change that would drop availability below zero is
    /// rejected, so seats already sold are never taken back.
    pub async fn update_event(
        &self,
        event_id: i64,
        request: EventUpdateRequest,
    ) -> AppResult<EventResponse> {
        if let Some(price) = request.price {
            if price <= Decimal::ZERO {
                return Err(AppError::ValidationError("Price must be positive".into()));
            }
        }

        let updated = sqlx::query(
            "UPDATE events SET
                 title = COALESCE(?1, title),
                 description = COALESCE(?2, description),
                 venue = COALESCE(?3, venue),
                 event_date = COALESCE(?4, event_date),
                 price = COALESCE(?5, price),
                 status = COALESCE(?6, status),
                 available_seats = available_seats + (COALESCE(?7, total_seats) - total_seats),
                 total_seats = COALESCE(?7, total_seats)
             WHERE id = ?8
               AND available_seats + (COALESCE(?7, total_seats) - total_seats) >= 0",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.venue)
        .bind(request.event_date)
        .bind(request.price.map(|p| p.to_string()))
        .bind(request.status.map(|s| s.to_string()))
        .bind(request.total_seats)
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
                .bind(event_id)
                .fetch_optional(&self.pool)
                .await?;
            return match exists {
                None => Err(AppError::NotFound("Event not found".into())),
                Some(_) => Err(AppError::Conflict(
                    "Total seats cannot drop below the number already booked".into(),
                )),
            };
        }

        self.get_event_by_id(event_id).await
    }

    pub async fn delete_event(&self, event_id: i64) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        info!("deleted event {}", event_id);
        Ok(())
    }

    pub async fn event_stats(&self) -> AppResult<EventStatsResponse> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events")
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now().naive_utc();
        let total_events = events.len() as i64;
        let upcoming_events = events
            .iter()
            .filter(|e| e.event_date > now && e.status == EventStatus::Active)
            .count() as i64;
        let total_seats: i64 = events.iter().map(|e| e.total_seats).sum();
        let available_seats: i64 = events.iter().map(|e| e.available_seats).sum();
        let average_price = if events.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = events.iter().map(|e| e.price).sum();
            sum / Decimal::from(total_events)
        };

        Ok(EventStatsResponse {
            total_events,
            upcoming_events,
            total_seats,
            available_seats,
            average_price,
        })
    }
}
