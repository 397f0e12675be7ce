pub mod admin;
pub mod booking;
pub mod event;
pub mod league;
pub mod user;
pub mod wishlist;
