use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    Cashier,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// role is stored as TEXT, decoded through strum
impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            full_name: row.try_get("full_name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            role: role.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UserRegistrationRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    // checked against the password policy, not the derive rules
    pub password: String,

    #[validate(length(max = 100, message = "Full name cannot exceed 100 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 20, message = "Phone number cannot exceed 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Address cannot exceed 200 characters"))]
    pub address: Option<String>,

    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserLoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize, JsonSchema)]
#[schemars(example = "RegisterResponse::example")]
pub struct RegisterResponse {
    #[schemars(title = "User ID")]
    pub user_id: i64,

    #[schemars(title = "Register Status")]
    pub status: String,
}

impl RegisterResponse {
    pub fn example() -> Self {
        Self {
            user_id: 123,
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        UserProfileResponse {
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

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "Full name cannot exceed 100 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 20, message = "Phone number cannot exceed 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Address cannot exceed 200 characters"))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProfileSummaryResponse {
    pub booking_count: i64,
    pub active_booking_count: i64,
    pub total_spent: rust_decimal::Decimal,
}
