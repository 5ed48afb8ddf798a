pub mod google;
pub mod jwt;
pub mod mail;
pub mod session;
