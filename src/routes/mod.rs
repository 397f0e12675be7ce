pub mod admin_route;
pub mod auth_route;
pub mod booking_route;
pub mod cashier_route;
pub mod catchers;
pub mod event_route;
pub mod league_route;
pub mod profile_route;
pub mod wishlist_route;
