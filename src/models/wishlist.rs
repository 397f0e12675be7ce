use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Wishlist {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub added_date: NaiveDateTime,
    pub notify_on_price_drop: bool,
    pub notify_before_event: bool,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct WishlistAddRequest {
    #[validate(range(min = 1, message = "Event id must be positive"))]
    pub event_id: i64,

    pub notify_on_price_drop: Option<bool>,
    pub notify_before_event: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WishlistSettingsRequest {
    pub notify_on_price_drop: Option<bool>,
    pub notify_before_event: Option<bool>,
}

/// Wishlist entry joined with its event for display.
#[derive(Debug, Serialize, JsonSchema)]
pub struct WishlistResponse {
    pub id: i64,
    pub event_id: i64,
    pub event_title: String,
    pub event_venue: String,
    pub event_date: NaiveDateTime,
    pub added_date: NaiveDateTime,
    pub notify_on_price_drop: bool,
    pub notify_before_event: bool,
}

// Built from queries that alias the joined event columns:
//   e.title AS event_title, e.venue AS event_venue, e.event_date
impl<'r> FromRow<'r, SqliteRow> for WishlistResponse {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(WishlistResponse {
            id: row.try_get("id")?,
            event_id: row.try_get("event_id")?,
            event_title: row.try_get("event_title")?,
            event_venue: row.try_get("event_venue")?,
            event_date: row.try_get("event_date")?,
            added_date: row.try_get("added_date")?,
            notify_on_price_drop: row.try_get("notify_on_price_drop")?,
            notify_before_event: row.try_get("notify_before_event")?,
        })
    }
}
