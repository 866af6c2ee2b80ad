//! # ChipIn Core - Domain Module
//!
//! Domain entities for groups, users and invitations.

pub mod user;
pub mod group;
pub mod invitation;

pub use user::User;
pub use group::{Group, GroupDetail};
pub use invitation::{Invitation, InvitationEmail};
