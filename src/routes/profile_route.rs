use crate::models::user::{
    ChangePasswordRequest, ProfileSummaryResponse, ProfileUpdateRequest, UserProfileResponse,
};
use crate::services::user_service::UserService;
use crate::utils::error::{validate_request, AppError};
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// The caller's profile
#[openapi(tag = "Profile")]
#[get("/profile")]
pub async fn get_profile(
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let profile = user_service.get_profile(auth.user_id).await?;
    Ok(Json(profile))
}

/// Update contact details on the caller's profile
#[openapi(tag = "Profile")]
#[put("/profile", format = "json", data = "<request>")]
pub async fn update_profile(
    request: Json<ProfileUpdateRequest>,
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<UserProfileResponse>, AppError> {
    validate_request(&*request)?;
    let profile = user_service
        .update_profile(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(profile))
}

/// Change the caller's password
#[openapi(tag = "Profile")]
#[post("/profile/password", format = "json", data = "<request>")]
pub async fn change_password(
    request: Json<ChangePasswordRequest>,
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<Value>, AppError> {
    user_service
        .change_password(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(json!({ "message": "Password updated" })))
}

/// Booking counters for the caller's dashboard
#[openapi(tag = "Profile")]
#[get("/profile/summary")]
pub async fn get_profile_summary(
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<ProfileSummaryResponse>, AppError> {
    let summary = user_service.profile_summary(auth.user_id).await?;
    Ok(Json(summary))
}
