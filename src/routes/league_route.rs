use crate::models::league::{LeagueCreateRequest, LeagueResponse, LeagueUpdateRequest};
use crate::services::league_service::LeagueService;
use crate::utils::error::{validate_request, AppError};
use crate::utils::jwt::AdminUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List all leagues
#[openapi(tag = "Leagues")]
#[get("/leagues")]
pub async fn get_all_leagues(
    league_service: &State<LeagueService>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    let leagues = league_service.get_all_leagues().await?;
    Ok(Json(leagues))
}

/// List leagues whose season is running
#[openapi(tag = "Leagues")]
#[get("/leagues/active")]
pub async fn get_active_leagues(
    league_service: &State<LeagueService>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    let leagues = league_service.get_active_leagues().await?;
    Ok(Json(leagues))
}

/// Search leagues by name or country
#[openapi(tag = "Leagues")]
#[get("/leagues/search?<query>")]
pub async fn search_leagues(
    query: String,
    league_service: &State<LeagueService>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    let leagues = league_service.search_leagues(&query).await?;
    Ok(Json(leagues))
}

/// List leagues for a country
#[openapi(tag = "Leagues")]
#[get("/leagues/country/<country>")]
pub async fn get_leagues_by_country(
    country: String,
    league_service: &State<LeagueService>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    let leagues = league_service.get_leagues_by_country(&country).await?;
    Ok(Json(leagues))
}

/// Fetch a single league
#[openapi(tag = "Leagues")]
#[get("/leagues/<league_id>")]
pub async fn get_league_by_id(
    league_id: i64,
    league_service: &State<LeagueService>,
) -> Result<Json<LeagueResponse>, AppError> {
    let league = league_service.get_league_by_id(league_id).await?;
    Ok(Json(league))
}

/// Create a league (admin only)
#[openapi(tag = "Leagues")]
#[post("/leagues", format = "json", data = "<request>")]
pub async fn create_league(
    request: Json<LeagueCreateRequest>,
    _admin: AdminUser,
    league_service: &State<LeagueService>,
) -> Result<Json<LeagueResponse>, AppError> {
    validate_request(&*request)?;
    let league = league_service.create_league(request.into_inner()).await?;
    Ok(Json(league))
}

/// Update a league (admin only)
#[openapi(tag = "Leagues")]
#[put("/leagues/<league_id>", format = "json", data = "<request>")]
pub async fn update_league(
    league_id: i64,
    request: Json<LeagueUpdateRequest>,
    _admin: AdminUser,
    league_service: &State<LeagueService>,
) -> Result<Json<LeagueResponse>, AppError> {
    validate_request(&*request)?;
    let league = league_service.update_league(league_id, request.into_inner()).await?;
    Ok(Json(league))
}
