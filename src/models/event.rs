use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub event_date: NaiveDateTime,
    pub total_seats: i64,
    pub available_seats: i64,
    pub price: Decimal,
    pub status: EventStatus,
    pub league_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

// price is stored as TEXT so ticket amounts stay exact
impl<'r> FromRow<'r, SqliteRow> for Event {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let price: String = row.try_get("price")?;
        let status: String = row.try_get("status")?;
        Ok(Event {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            venue: row.try_get("venue")?,
            event_date: row.try_get("event_date")?,
            total_seats: row.try_get("total_seats")?,
            available_seats: row.try_get("available_seats")?,
            price: price.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(e),
            })?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            league_id: row.try_get("league_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct EventCreateRequest {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Venue must be between 2 and 100 characters"))]
    pub venue: String,

    pub event_date: NaiveDateTime,

    #[validate(range(min = 1, max = 200000, message = "Total seats must be between 1 and 200000"))]
    pub total_seats: i64,

    pub price: Decimal,

    pub league_id: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct EventUpdateRequest {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Venue must be between 2 and 100 characters"))]
    pub venue: Option<String>,

    pub event_date: Option<NaiveDateTime>,

    #[validate(range(min = 1, max = 200000, message = "Total seats must be between 1 and 200000"))]
    pub total_seats: Option<i64>,

    pub price: Option<Decimal>,

    pub status: Option<EventStatus>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub event_date: NaiveDateTime,
    pub total_seats: i64,
    pub available_seats: i64,
    pub price: Decimal,
    pub status: EventStatus,
    pub league_id: Option<i64>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        EventResponse {
            id: event.id,
            title: event.title,
            description: event.description,
            venue: event.venue,
            event_date: event.event_date,
            total_seats: event.total_seats,
            available_seats: event.available_seats,
            price: event.price,
            status: event.status,
            league_id: event.league_id,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EventStatsResponse {
    pub total_events: i64,
    pub upcoming_events: i64,
    pub total_seats: i64,
    pub available_seats: i64,
    pub average_price: Decimal,
}
