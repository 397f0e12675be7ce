use crate::models::event::{EventCreateRequest, EventResponse, EventStatsResponse, EventUpdateRequest};
use crate::services::event_service::EventService;
use crate::utils::error::{validate_request, AppError};
use crate::utils::jwt::AdminUser;
use chrono::NaiveDate;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// List all events
#[openapi(tag = "Events")]
#[get("/events")]
pub async fn get_all_events(
    event_service: &State<EventService>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = event_service.get_all_events().await?;
    Ok(Json(events))
}

/// List active events that have not happened yet
#[openapi(tag = "Events")]
#[get("/events/upcoming")]
pub async fn get_upcoming_events(
    event_service: &State<EventService>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = event_service.get_upcoming_events().await?;
    Ok(Json(events))
}

/// The first three upcoming events
#[openapi(tag = "Events")]
#[get("/events/featured")]
pub async fn get_featured_events(
    event_service: &State<EventService>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = event_service.get_featured_events().await?;
    Ok(Json(events))
}

/// Search events by title, venue and calendar date (YYYY-MM-DD)
#[openapi(tag = "Events")]
#[get("/events/search?<query>&<venue>&<date>")]
pub async fn search_events(
    query: Option<String>,
    venue: Option<String>,
    date: Option<String>,
    event_service: &State<EventService>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let date = match date {
        Some(raw) => Some(
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest("Date must be formatted YYYY-MM-DD".into()))?,
        ),
        None => None,
    };
    let events = event_service.search_events(query, venue, date).await?;
    Ok(Json(events))
}

/// Aggregate counters over the event catalogue
#[openapi(tag = "Events")]
#[get("/events/stats")]
pub async fn get_event_stats(
    event_service: &State<EventService>,
) -> Result<Json<EventStatsResponse>, AppError> {
    let stats = event_service.event_stats().await?;
    Ok(Json(stats))
}

/// List events belonging to a league
#[openapi(tag = "Events")]
#[get("/events/league/<league_id>")]
pub async fn get_events_by_league(
    league_id: i64,
    event_service: &State<EventService>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = event_service.get_events_by_league(league_id).await?;
    Ok(Json(events))
}

/// Fetch a single event
#[openapi(tag = "Events")]
#[get("/events/<event_id>")]
pub async fn get_event_by_id(
    event_id: i64,
    event_service: &State<EventService>,
) -> Result<Json<EventResponse>, AppError> {
    let event = event_service.get_event_by_id(event_id).await?;
    Ok(Json(event))
}

/// Create an event (admin only)
#[openapi(tag = "Events")]
#[post("/events", format = "json", data = "<request>")]
pub async fn create_event(
    request: Json<EventCreateRequest>,
    _admin: AdminUser,
    event_service: &State<EventService>,
) -> Result<Json<EventResponse>, AppError> {
    validate_request(&*request)?;
    let event = event_service.create_event(request.into_inner()).await?;
    Ok(Json(event))
}

/// Update an event (admin only)
#[openapi(tag = "Events")]
#[put("/events/<event_id>", format = "json", data = "<request>")]
pub async fn update_event(
    event_id: i64,
    request: Json<EventUpdateRequest>,
    _admin: AdminUser,
    event_service: &State<EventService>,
) -> Result<Json<EventResponse>, AppError> {
    validate_request(&*request)?;
    let event = event_service.update_event(event_id, request.into_inner()).await?;
    Ok(Json(event))
}

/// Delete an event (admin only)
#[openapi(tag = "Events")]
#[delete("/events/<event_id>")]
pub async fn delete_event(
    event_id: i64,
    _admin: AdminUser,
    event_service: &State<EventService>,
) -> Result<Json<Value>, AppError> {
    event_service.delete_event(event_id).await?;
    Ok(Json(json!({ "message": "Event deleted" })))
}
