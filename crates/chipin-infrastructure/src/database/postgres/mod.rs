//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod group_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use group_repo_impl::PgGroupRepository;
