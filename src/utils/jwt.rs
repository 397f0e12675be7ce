use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::env;
use rocket_okapi::request::OpenApiFromRequest;

use crate::models::user::{Role, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub role: Role,
    pub exp: usize,
}

/// Guard for any authenticated caller. The token subject is resolved against
/// the users table on every request, so deleted accounts and stale role
/// claims are rejected.
#[derive(Debug, OpenApiFromRequest)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

/// Guard for ADMIN-only routes.
#[derive(Debug, OpenApiFromRequest)]
pub struct AdminUser(pub AuthenticatedUser);

/// Guard for CASHIER-only routes.
#[derive(Debug, OpenApiFromRequest)]
pub struct CashierUser(pub AuthenticatedUser);

pub fn generate_token(username: &str, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        // Set expiration time to 24 hours
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        role,
        exp: expiration,
    };

    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request.headers().get_one("Authorization") {
            Some(token) if token.starts_with("Bearer ") => token[7..].to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };

        let claims = match decode_token(&token) {
            Ok(claims) => claims,
            Err(_) => return Outcome::Error((Status::Unauthorized, ())),
        };

        let pool = match request.rocket().state::<SqlitePool>() {
            Some(pool) => pool,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(&claims.sub)
            .fetch_optional(pool)
            .await;

        match user {
            Ok(Some(user)) => Outcome::Success(AuthenticatedUser {
                user_id: user.id,
                username: user.username,
                role: user.role,
            }),
            Ok(None) => Outcome::Error((Status::Unauthorized, ())),
            Err(_) => Outcome::Error((Status::InternalServerError, ())),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = match AuthenticatedUser::from_request(request).await {
            Outcome::Success(user) => user,
            Outcome::Error(error) => return Outcome::Error(error),
            Outcome::Forward(forward) => return Outcome::Forward(forward),
        };

        if user.role != Role::Admin {
            return Outcome::Error((Status::Forbidden, ()));
        }
        Outcome::Success(AdminUser(user))
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CashierUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = match AuthenticatedUser::from_request(request).await {
            Outcome::Success(user) => user,
            Outcome::Error(error) => return Outcome::Error(error),
            Outcome::Forward(forward) => return Outcome::Forward(forward),
        };

        if user.role != Role::Cashier {
            return Outcome::Error((Status::Forbidden, ()));
        }
        Outcome::Success(CashierUser(user))
    }
}
