//! # ChipIn Shared
//!
//! Shared configuration, telemetry, and common types for the ChipIn services.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
