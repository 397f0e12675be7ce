use crate::models::booking::BookingStatus;
use crate::models::user::{
    ChangePasswordRequest, ProfileSummaryResponse, ProfileUpdateRequest, Role, User,
    UserLoginRequest, UserLoginResponse, UserProfileResponse, UserRegistrationRequest,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt;
use crate::utils::password;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use log::{info, warn};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::env;

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        // BCRYPT_COST is a deployment knob; tests dial it down
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_COST);
        UserService { pool, bcrypt_cost }
    }

    // Register a new user
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<i64> {
        // Check if username already exists
        let existing_username: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
                .bind(&request.username)
                .fetch_optional(&self.pool)
                .await?;
        if existing_username.is_some() {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        // Check if email already exists
        let existing_email: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
                .bind(&request.email)
                .fetch_optional(&self.pool)
                .await?;
        if existing_email.is_some() {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let check = password::validate_password(&request.password);
        if !check.is_valid() {
            return Err(AppError::ValidationError(format!(
                "Password validation failed: {}",
                check.error_message()
            )));
        }

        // Hash password
        let hashed_password = hash(request.password.as_bytes(), self.bcrypt_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let role = request.role.unwrap_or(Role::User);
        let now = Utc::now().naive_utc();
        let result = sqlx::query(
            "INSERT INTO users (username, email, password, full_name, phone, address, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&hashed_password)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(role.to_string())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!("registered user {} with role {}", request.username, role);
        Ok(result.last_insert_rowid())
    }

    // Login user
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<UserLoginResponse> {
        let user = self
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".into()))?;

        // Verify password
        let password_matches = verify(request.password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            warn!("failed login attempt for {}", request.username);
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        // Generate JWT token
        let token = jwt::generate_token(&user.username, user.role)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        Ok(UserLoginResponse {
            token,
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserProfileResponse> {
        let user = self.get_user_by_id(user_id).await?;
        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        request: ProfileUpdateRequest,
    ) -> AppResult<UserProfileResponse> {
        let user = self.get_user_by_id(user_id).await?;

        // A changed email must stay unique
        if let Some(new_email) = &request.email {
            if *new_email != user.email {
                let taken: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM users WHERE email = ? AND id != ?")
                        .bind(new_email)
                        .bind(user_id)
                        .fetch_optional(&self.pool)
                        .await?;
                if taken.is_some() {
                    return Err(AppError::Conflict("Email already registered".into()));
                }
            }
        }

        sqlx::query(
            "UPDATE users SET
                 email = COALESCE(?, email),
                 full_name = COALESCE(?, full_name),
                 phone = COALESCE(?, phone),
                 address = COALESCE(?, address),
                 updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.email)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(Utc::now().naive_utc())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get_profile(user_id).await
    }

    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        let user = self.get_user_by_id(user_id).await?;

        let current_matches = verify(request.current_password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;
        if !current_matches {
            return Err(AppError::BadRequest("Current password is incorrect".into()));
        }

        let check = password::validate_password(&request.new_password);
        if !check.is_valid() {
            return Err(AppError::ValidationError(format!(
                "Password validation failed: {}",
                check.error_message()
            )));
        }

        let hashed_password = hash(request.new_password.as_bytes(), self.bcrypt_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        sqlx::query("UPDATE users SET password = ?, updated_at = ? WHERE id = ?")
            .bind(&hashed_password)
            .bind(Utc::now().naive_utc())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("password changed for user {}", user.username);
        Ok(())
    }

    /// Booking counters shown on the profile page. Total spent covers
    /// confirmed and completed bookings only.
    pub async fn profile_summary(&self, user_id: i64) -> AppResult<ProfileSummaryResponse> {
        self.get_user_by_id(user_id).await?;

        let booking_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let active_booking_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE user_id = ? AND status IN (?, ?)",
        )
        .bind(user_id)
        .bind(BookingStatus::Pending.to_string())
        .bind(BookingStatus::Confirmed.to_string())
        .fetch_one(&self.pool)
        .await?;

        // Amounts are TEXT decimals; summing happens on the Rust side
        let amounts: Vec<String> = sqlx::query_scalar(
            "SELECT total_amount FROM bookings WHERE user_id = ? AND status IN (?, ?)",
        )
        .bind(user_id)
        .bind(BookingStatus::Confirmed.to_string())
        .bind(BookingStatus::Completed.to_string())
        .fetch_all(&self.pool)
        .await?;
        let total_spent = sum_amounts(&amounts)?;

        Ok(ProfileSummaryResponse {
            booking_count,
            active_booking_count,
            total_spent,
        })
    }
}

pub(crate) fn sum_amounts(amounts: &[String]) -> AppResult<Decimal> {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        let value: Decimal = amount
            .parse()
            .map_err(|_| AppError::DatabaseError(format!("invalid amount: {}", amount)))?;
        total += value;
    }
    Ok(total)
}
