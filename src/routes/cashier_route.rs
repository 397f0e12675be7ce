use crate::models::admin::StaffBookingResponse;
use crate::models::booking::BookingStatus;
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::CashierUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List every booking for the counter desk
#[openapi(tag = "Cashier")]
#[get("/cashier/bookings")]
pub async fn get_all_bookings(
    _cashier: CashierUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<StaffBookingResponse>>, AppError> {
    let bookings = booking_service.get_all_bookings().await?;
    Ok(Json(bookings))
}

/// Look up a booking by reference at the counter
#[openapi(tag = "Cashier")]
#[get("/cashier/bookings/reference/<reference>")]
pub async fn get_booking_by_reference(
    reference: String,
    _cashier: CashierUser,
    booking_service: &State<BookingService>,
) -> Result<Json<StaffBookingResponse>, AppError> {
    let booking = booking_service
        .get_staff_booking_by_reference(&reference)
        .await?;
    Ok(Json(booking))
}

/// List bookings in a given status
#[openapi(tag = "Cashier")]
#[get("/cashier/bookings/status/<status>")]
pub async fn get_bookings_by_status(
    status: String,
    _cashier: CashierUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<StaffBookingResponse>>, AppError> {
    let status: BookingStatus = status
        .parse()
        .map_err(|_| AppError::BadRequest("Unknown booking status".into()))?;
    let bookings = booking_service.get_bookings_by_status(status).await?;
    Ok(Json(bookings))
}
