//! Domain services (business logic)

pub mod group_service;
pub mod invitation_service;

pub use group_service::{GroupService, InviteCandidates};
pub use invitation_service::{AcceptOutcome, InvitationService};
