//! # ChipIn Core
//!
//! Domain entities, services, and the repository and notifier traits for ChipIn groups.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod notifier;
pub mod policy;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use notifier::{Notifier, NotifierError, OutboundEmail};
