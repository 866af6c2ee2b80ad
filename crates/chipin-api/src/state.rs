use std::sync::Arc;

use chipin_core::notifier::Notifier;
use chipin_core::repositories::{GroupRepository, UserRepository};
use chipin_core::services::{GroupService, InvitationService};
use chipin_security::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<GroupService>,
    pub invitation_service: Arc<InvitationService>,
    pub users: Arc<dyn UserRepository>,
    pub jwt: Arc<JwtService>,
    /// Origin used in invitation links, e.g. `https://chipin.example.com`.
    pub base_url: String,
    pub app_name: String,
}

impl AppState {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
        jwt: JwtService,
        base_url: String,
        app_name: String,
    ) -> Self {
        Self {
            group_service: Arc::new(GroupService::new(groups.clone(), users.clone())),
            invitation_service: Arc::new(InvitationService::new(groups, users.clone(), notifier)),
            users,
            jwt: Arc::new(jwt),
            base_url,
            app_name,
        }
    }
}
