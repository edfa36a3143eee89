pub mod auth;
pub mod home;
pub mod json_error;
pub mod posts;
pub mod uploads;
