use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::booking::BookingStatus;
use crate::models::user::{Role, User};

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Serialize, JsonSchema)]
pub struct SystemStatsResponse {
    pub total_users: i64,
    pub regular_users: i64,
    pub admin_users: i64,
    pub cashier_users: i64,
    pub total_events: i64,
    pub active_events: i64,
    pub upcoming_events: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    pub completed_bookings: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct AdminUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        AdminUserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Booking joined with its owner and event, for staff listings.
#[derive(Debug, Serialize, JsonSchema)]
pub struct StaffBookingResponse {
    pub id: i64,
    pub booking_reference: String,
    pub user_id: i64,
    pub username: String,
    pub event_id: i64,
    pub event_title: String,
    pub number_of_tickets: i64,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: NaiveDateTime,
}

// Built from queries that alias the joined columns:
//   u.username, e.title AS event_title
impl<'r> FromRow<'r, SqliteRow> for StaffBookingResponse {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let total_amount: String = row.try_get("total_amount")?;
        let status: String = row.try_get("status")?;
        Ok(StaffBookingResponse {
            id: row.try_get("id")?,
            booking_reference: row.try_get("booking_reference")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            event_id: row.try_get("event_id")?,
            event_title: row.try_get("event_title")?,
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

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BookingStatusUpdateRequest {
    pub status: BookingStatus,
}
