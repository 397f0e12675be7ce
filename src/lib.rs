#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;
use sqlx::SqlitePool;

use crate::swagger::swagger_ui;
use crate::utils::rate_limit::RateLimiter;

/// Assemble the Rocket instance over an already migrated pool. The pool
/// itself is managed alongside the services because the auth guards resolve
/// token subjects against the users table.
pub fn build_rocket(pool: SqlitePool) -> Rocket<Build> {
    let user_service = services::user_service::UserService::new(pool.clone());
    let event_service = services::event_service::EventService::new(pool.clone());
    let booking_service = services::booking_service::BookingService::new(pool.clone());
    let league_service = services::league_service::LeagueService::new(pool.clone());
    let wishlist_service = services::wishlist_service::WishlistService::new(pool.clone());
    let admin_service = services::admin_service::AdminService::new(pool.clone());

    rocket::build()
        .manage(pool)
        .manage(user_service)
        .manage(event_service)
        .manage(booking_service)
        .manage(league_service)
        .manage(wishlist_service)
        .manage(admin_service)
        .manage(RateLimiter::new())
        .mount(
            "/api",
            openapi_get_routes![
                routes::auth_route::register,
                routes::auth_route::login,
                routes::event_route::get_all_events,
                routes::event_route::get_upcoming_events,
                routes::event_route::get_featured_events,
                routes::event_route::search_events,
                routes::event_route::get_event_stats,
                routes::event_route::get_events_by_league,
                routes::event_route::get_event_by_id,
                routes::event_route::create_event,
                routes::event_route::update_event,
                routes::event_route::delete_event,
                routes::booking_route::create_booking,
                routes::booking_route::get_user_bookings,
                routes::booking_route::get_booking_by_reference,
                routes::booking_route::cancel_booking,
                routes::league_route::get_all_leagues,
                routes::league_route::get_active_leagues,
                routes::league_route::search_leagues,
                routes::league_route::get_leagues_by_country,
                routes::league_route::get_league_by_id,
                routes::league_route::create_league,
                routes::league_route::update_league,
                routes::wishlist_route::add_to_wishlist,
                routes::wishlist_route::remove_from_wishlist,
                routes::wishlist_route::get_wishlist,
                routes::wishlist_route::check_wishlist,
                routes::wishlist_route::update_wishlist_settings,
                routes::wishlist_route::get_wishlist_count,
                routes::profile_route::get_profile,
                routes::profile_route::update_profile,
                routes::profile_route::change_password,
                routes::profile_route::get_profile_summary,
                routes::admin_route::get_system_stats,
                routes::admin_route::get_all_users,
                routes::admin_route::get_user,
                routes::admin_route::delete_user,
                routes::admin_route::get_all_bookings,
                routes::admin_route::update_booking_status,
                routes::admin_route::delete_booking,
                routes::cashier_route::get_all_bookings,
                routes::cashier_route::get_booking_by_reference,
                routes::cashier_route::get_bookings_by_status,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .register(
            "/",
            catchers![
                routes::catchers::unauthorized,
                routes::catchers::forbidden,
                routes::catchers::not_found,
                routes::catchers::too_many_requests,
                routes::catchers::default_catcher,
            ],
        )
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
