use crate::models::wishlist::{WishlistAddRequest, WishlistResponse, WishlistSettingsRequest};
use crate::services::wishlist_service::WishlistService;
use crate::utils::error::{validate_request, AppError};
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// Add an event to the caller's wishlist
#[openapi(tag = "Wishlist")]
#[post("/wishlist/add", format = "json", data = "<request>")]
pub async fn add_to_wishlist(
    request: Json<WishlistAddRequest>,
    auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<WishlistResponse>, AppError> {
    validate_request(&*request)?;
    let entry = wishlist_service
        .add_to_wishlist(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(entry))
}

/// Remove an event from the caller's wishlist
#[openapi(tag = "Wishlist")]
#[delete("/wishlist/remove/<event_id>")]
pub async fn remove_from_wishlist(
    event_id: i64,
    auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<Value>, AppError> {
    wishlist_service
        .remove_from_wishlist(auth.user_id, event_id)
        .await?;
    Ok(Json(json!({ "message": "Event removed from wishlist" })))
}

/// List the caller's wishlist, newest first
#[openapi(tag = "Wishlist")]
#[get("/wishlist")]
pub async fn get_wishlist(
    auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<Vec<WishlistResponse>>, AppError> {
    let entries = wishlist_service.get_user_wishlist(auth.user_id).await?;
    Ok(Json(entries))
}

/// Tell whether an event is in the caller's wishlist
#[openapi(tag = "Wishlist")]
#[get("/wishlist/check/<event_id>")]
pub async fn check_wishlist(
    event_id: i64,
    auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<Value>, AppError> {
    let in_wishlist = wishlist_service
        .is_event_in_wishlist(auth.user_id, event_id)
        .await?;
    Ok(Json(json!({ "in_wishlist": in_wishlist })))
}

/// Update the notification flags of a wishlist entry
#[openapi(tag = "Wishlist")]
#[put("/wishlist/settings/<event_id>", format = "json", data = "<request>")]
pub async fn update_wishlist_settings(
    event_id: i64,
    request: Json<WishlistSettingsRequest>,
    auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<WishlistResponse>, AppError> {
    let entry = wishlist_service
        .update_settings(auth.user_id, event_id, request.into_inner())
        .await?;
    Ok(Json(entry))
}

/// How many users wishlisted the given event
#[openapi(tag = "Wishlist")]
#[get("/wishlist/count/<event_id>")]
pub async fn get_wishlist_count(
    event_id: i64,
    _auth: AuthenticatedUser,
    wishlist_service: &State<WishlistService>,
) -> Result<Json<Value>, AppError> {
    let count = wishlist_service.event_wishlist_count(event_id).await?;
    Ok(Json(json!({ "event_id": event_id, "count": count })))
}
