use crate::models::booking::{BookingRequest, BookingResponse};
use crate::services::booking_service::BookingService;
use crate::utils::error::{validate_request, AppError};
use crate::utils::jwt::AuthenticatedUser;
use crate::models::user::Role;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Book tickets for an event
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<BookingRequest>,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    validate_request(&*request)?;
    let booking = booking_service
        .create_booking(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(booking))
}

/// List a user's bookings, newest first
#[openapi(tag = "Bookings")]
#[get("/bookings/user/<user_id>")]
pub async fn get_user_bookings(
    user_id: i64,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    if auth.user_id != user_id && auth.role != Role::Admin {
        return Err(AppError::Forbidden("You can only view your own bookings".into()));
    }
    let bookings = booking_service.get_user_bookings(user_id).await?;
    Ok(Json(bookings))
}

/// Look up a booking by its reference code
#[openapi(tag = "Bookings")]
#[get("/bookings/reference/<reference>")]
pub async fn get_booking_by_reference(
    reference: String,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service.get_booking_by_reference(&reference).await?;
    Ok(Json(booking))
}

/// Cancel one of the caller's bookings and release its seats
#[openapi(tag = "Bookings")]
#[put("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(
    booking_id: i64,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service.cancel_booking(auth.user_id, booking_id).await?;
    Ok(Json(booking))
}
