pub mod admin;
pub mod auth;
pub mod booking;
pub mod bus;
pub mod oauth;
pub mod rental;
pub mod review;
pub mod user;
