use crate::models::admin::{
    AdminUserResponse, BookingStatusUpdateRequest, StaffBookingResponse, SystemStatsResponse,
};
use crate::services::admin_service::AdminService;
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// Platform-wide counters
#[openapi(tag = "Admin")]
#[get("/admin/stats")]
pub async fn get_system_stats(
    _admin: AdminUser,
    admin_service: &State<AdminService>,
) -> Result<Json<SystemStatsResponse>, AppError> {
    let stats = admin_service.system_stats().await?;
    Ok(Json(stats))
}

/// List every account
#[openapi(tag = "Admin")]
#[get("/admin/users")]
pub async fn get_all_users(
    _admin: AdminUser,
    admin_service: &State<AdminService>,
) -> Result<Json<Vec<AdminUserResponse>>, AppError> {
    let users = admin_service.list_users().await?;
    Ok(Json(users))
}

/// Fetch a single account
#[openapi(tag = "Admin")]
#[get("/admin/users/<user_id>")]
pub async fn get_user(
    user_id: i64,
    _admin: AdminUser,
    admin_service: &State<AdminService>,
) -> Result<Json<AdminUserResponse>, AppError> {
    let user = admin_service.get_user(user_id).await?;
    Ok(Json(user))
}

/// Delete an account and everything attached to it
#[openapi(tag = "Admin")]
#[delete("/admin/users/<user_id>")]
pub async fn delete_user(
    user_id: i64,
    admin: AdminUser,
    admin_service: &State<AdminService>,
) -> Result<Json<Value>, AppError> {
    admin_service.delete_user(admin.0.user_id, user_id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}

/// List every booking
#[openapi(tag = "Admin")]
#[get("/admin/bookings")]
pub async fn get_all_bookings(
    _admin: AdminUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<StaffBookingResponse>>, AppError> {
    let bookings = booking_service.get_all_bookings().await?;
    Ok(Json(bookings))
}

/// Move a booking to another status
#[openapi(tag = "Admin")]
#[put("/admin/bookings/<booking_id>/status", format = "json", data = "<request>")]
pub async fn update_booking_status(
    booking_id: i64,
    request: Json<BookingStatusUpdateRequest>,
    _admin: AdminUser,
    booking_service: &State<BookingService>,
) -> Result<Json<StaffBookingResponse>, AppError> {
    let booking = booking_service
        .update_booking_status(booking_id, request.into_inner().status)
        .await?;
    Ok(Json(booking))
}

/// Delete a booking record
#[openapi(tag = "Admin")]
#[delete("/admin/bookings/<booking_id>")]
pub async fn delete_booking(
    booking_id: i64,
    _admin: AdminUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Value>, AppError> {
    booking_service.delete_booking(booking_id).await?;
    Ok(Json(json!({ "message": "Booking deleted" })))
}
