//! Authorization checks for group operations

use crate::domain::{Group, User};

/// Only the group admin may delete a group.
pub fn can_delete(user: &User, group: &Group) -> bool {
    group.is_admin(&user.id)
}
