pub mod booking;
pub mod booking_book;
pub mod booking_detail;
pub mod bus;
pub mod bus_route;
pub mod faq;
pub mod feedback_review;
pub mod profile;
pub mod reservation;
pub mod route;
pub mod user;
