//! # ChipIn API
//!
//! HTTP handlers, the auth extractor, DTOs and the response envelope.

pub mod handlers;
pub mod middleware;
pub mod dto;
pub mod error;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
