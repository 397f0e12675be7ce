use crate::models::wishlist::{
    WishlistAddRequest, WishlistResponse, WishlistSettingsRequest,
};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;

const WISHLIST_DETAIL_SQL: &str = "SELECT w.id, w.event_id, e.title AS event_title, e.venue AS event_venue, e.event_date,
        w.added_date, w.notify_on_price_drop, w.notify_before_event
 FROM wishlists w
 JOIN events e ON e.id = w.event_id";

#[derive(Clone)]
pub struct WishlistService {
    pool: SqlitePool,
}

impl WishlistService {
    pub fn new(pool: SqlitePool) -> Self {
        WishlistService { pool }
    }

    pub async fn add_to_wishlist(
        &self,
        user_id: i64,
        request: WishlistAddRequest,
    ) -> AppResult<WishlistResponse> {
        let event: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
            .bind(request.event_id)
            .fetch_optional(&self.pool)
            .await?;
        if event.is_none() {
            return Err(AppError::NotFound("Event not found".into()));
        }

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE user_id = ? AND event_id = ?")
                .bind(user_id)
                .bind(request.event_id)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Event is already in the wishlist".into()));
        }

        let result = sqlx::query(
            "INSERT INTO wishlists (user_id, event_id, added_date, notify_on_price_drop, notify_before_event)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.event_id)
        .bind(Utc::now().naive_utc())
        .bind(request.notify_on_price_drop.unwrap_or(false))
        .bind(request.notify_before_event.unwrap_or(true))
        .execute(&self.pool)
        .await?;

        self.get_entry(result.last_insert_rowid()).await
    }

    pub async fn remove_from_wishlist(&self, user_id: i64, event_id: i64) -> AppResult<()> {
        let removed = sqlx::query("DELETE FROM wishlists WHERE user_id = ? AND event_id = ?")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(AppError::NotFound("Event is not in the wishlist".into()));
        }
        Ok(())
    }

    pub async fn get_user_wishlist(&self, user_id: i64) -> AppResult<Vec<WishlistResponse>> {
        let entries = sqlx::query_as::<_, WishlistResponse>(&format!(
            "{} WHERE w.user_id = ? ORDER BY w.added_date DESC",
            WISHLIST_DETAIL_SQL
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn is_event_in_wishlist(&self, user_id: i64, event_id: i64) -> AppResult<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE user_id = ? AND event_id = ?")
                .bind(user_id)
                .bind(event_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    pub async fn update_settings(
        &self,
        user_id: i64,
        event_id: i64,
        request: WishlistSettingsRequest,
    ) -> AppResult<WishlistResponse> {
        let updated = sqlx::query(
            "UPDATE wishlists SET
                 notify_on_price_drop = COALESCE(?, notify_on_price_drop),
                 notify_before_event = COALESCE(?, notify_before_event)
             WHERE user_id = ? AND event_id = ?",
        )
        .bind(request.notify_on_price_drop)
        .bind(request.notify_before_event)
        .bind(user_id)
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Event is not in the wishlist".into()));
        }

        let id: i64 =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE user_id = ? AND event_id = ?")
                .bind(user_id)
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;
        self.get_entry(id).await
    }

    /// How many users keep the given event in their wishlist.
    pub async fn event_wishlist_count(&self, event_id: i64) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM wishlists WHERE event_id = ?")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn get_entry(&self, id: i64) -> AppResult<WishlistResponse> {
        sqlx::query_as::<_, WishlistResponse>(&format!("{} WHERE w.id = ?", WISHLIST_DETAIL_SQL))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Wishlist entry not found".into()))
    }
}
