//! Request extractors shared by the handlers

pub mod auth;

pub use auth::CurrentUser;
