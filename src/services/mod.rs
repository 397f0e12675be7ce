pub mod admin_service;
pub mod booking_service;
pub mod event_service;
pub mod league_service;
pub mod user_service;
pub mod wishlist_service;
