//! # ChipIn Infrastructure
//!
//! Storage and email adapters for the ChipIn core ports.

pub mod database;
pub mod mail;

pub use database::{create_pool, run_migrations, MemoryStore, PgGroupRepository, PgUserRepository};
pub use mail::{create_notifier, LogNotifier, OutboxNotifier, SmtpNotifier};
