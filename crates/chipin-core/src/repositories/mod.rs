//! Repository traits (ports)

pub mod user_repository;
pub mod group_repository;

pub use user_repository::UserRepository;
pub use group_repository::GroupRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
