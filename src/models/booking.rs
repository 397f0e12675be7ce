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
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    pub booking_reference: String,
    pub user_id: i64,
    pub event_id: i64,
    pub number_of_tickets: i64,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: NaiveDateTime,
}

impl<'r> FromRow<'r, SqliteRow> for Booking {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let total_amount: String = row.try_get("total_amount")?;
        let status: String = row.try_get("status")?;
        Ok(Booking {
            id: row.try_get("id")?,
            booking_reference: row.try_get("booking_reference")?,
            user_id: row.try_get("user_id")?,
            event_id: row.try_get("event_id")?,
            number_of_tickets: row.try_get("number_of_tickets")?,
            total_amount: total_amount.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_amount".to_string(),
                source: Box::new(e),
            })?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            booking_date: row.try_get("booking_date")?,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct BookingRequest {
    #[validate(range(min = 1, message = "Event id must be positive"))]
    pub event_id: i64,

    #[validate(range(min = 1, max = 10, message = "Number of tickets must be between 1 and 10"))]
    pub number_of_tickets: i64,
}

/// Booking joined with its event, as returned to the booking owner.
#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub booking_reference: String,
    pub event_title: String,
    pub venue: String,
    pub event_date: NaiveDateTime,
    pub number_of_tickets: i64,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: NaiveDateTime,
}

// Built from queries that alias the joined event columns:
//   e.title AS event_title, e.venue, e.event_date
impl<'r> FromRow<'r, SqliteRow> for BookingResponse {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let total_amount: String = row.try_get("total_amount")?;
        let status: String = row.try_get("status")?;
        Ok(BookingResponse {
            id: row.try_get("id")?,
            booking_reference: row.try_get("booking_reference")?,
            event_title: row.try_get("event_title")?,
            venue: row.try_get("venue")?,
            event_date: row.try_get("event_date")?,
            number_of_tickets: row.try_get("number_of_tickets")?,
            total_amount: total_amount.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_amount".to_string(),
                source: Box::new(e),
            })?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            booking_date: row.try_get("booking_date")?,
        })
    }
}
