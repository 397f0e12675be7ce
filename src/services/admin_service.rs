use crate::models::admin::{AdminUserResponse, SystemStatsResponse};
use crate::models::booking::BookingStatus;
use crate::models::event::EventStatus;
use crate::models::user::{Role, User};
use crate::services::user_service::sum_amounts;
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use log::info;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AdminService {
    pool: SqlitePool,
}

impl AdminService {
    pub fn new(pool: SqlitePool) -> Self {
        AdminService { pool }
    }

    pub async fn system_stats(&self) -> AppResult<SystemStatsResponse> {
        let total_users = self.count("SELECT COUNT(*) FROM users", None).await?;
        let regular_users = self
            .count("SELECT COUNT(*) FROM users WHERE role = ?", Some(Role::User.to_string()))
            .await?;
        let admin_users = self
            .count("SELECT COUNT(*) FROM users WHERE role = ?", Some(Role::Admin.to_string()))
            .await?;
        let cashier_users = self
            .count("SELECT COUNT(*) FROM users WHERE role = ?", Some(Role::Cashier.to_string()))
            .await?;

        let total_events = self.count("SELECT COUNT(*) FROM events", None).await?;
        let active_events = self
            .count(
                "SELECT COUNT(*) FROM events WHERE status = ?",
                Some(EventStatus::Active.to_string()),
            )
            .await?;
        let upcoming_events: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE status = ? AND event_date > ?",
        )
        .bind(EventStatus::Active.to_string())
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        let total_bookings = self.count("SELECT COUNT(*) FROM bookings", None).await?;
        let pending_bookings = self.count_bookings(BookingStatus::Pending).await?;
        let confirmed_bookings = self.count_bookings(BookingStatus::Confirmed).await?;
        let cancelled_bookings = self.count_bookings(BookingStatus::Cancelled).await?;
        let completed_bookings = self.count_bookings(BookingStatus::Completed).await?;

        // Revenue counts confirmed and completed bookings, summed exactly
        let amounts: Vec<String> = sqlx::query_scalar(
            "SELECT total_amount FROM bookings WHERE status IN (?, ?)",
        )
        .bind(BookingStatus::Confirmed.to_string())
        .bind(BookingStatus::Completed.to_string())
        .fetch_all(&self.pool)
        .await?;
        let total_revenue = sum_amounts(&amounts)?;

        Ok(SystemStatsResponse {
            total_users,
            regular_users,
            admin_users,
            cashier_users,
            total_events,
            active_events,
            upcoming_events,
            total_bookings,
            pending_bookings,
            confirmed_bookings,
            cancelled_bookings,
            completed_bookings,
            total_revenue,
        })
    }

    pub async fn list_users(&self) -> AppResult<Vec<AdminUserResponse>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users.into_iter().map(AdminUserResponse::from).collect())
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<AdminUserResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Ok(user.into())
    }

    /// Remove an account along with its bookings and wishlist entries.
    /// Admin accounts cannot delete themselves through this path.
    pub async fn delete_user(&self, acting_admin_id: i64, user_id: i64) -> AppResult<()> {
        if acting_admin_id == user_id {
            return Err(AppError::BadRequest("You cannot delete your own account".into()));
        }

        let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        info!("user {} deleted by admin {}", user_id, acting_admin_id);
        Ok(())
    }

    async fn count(&self, sql: &str, bind: Option<String>) -> AppResult<i64> {
        let mut query = sqlx::query_scalar(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let count: i64 = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_bookings(&self, status: BookingStatus) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM bookings WHERE status = ?",
            Some(status.to_string()),
        )
        .await
    }
}
