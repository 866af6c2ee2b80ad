//! End-to-end invitation and group lifecycle against the in-memory adapters.

use std::sync::Arc;

use chipin_core::domain::invitation::decode_email;
use chipin_core::repositories::GroupRepository;
use chipin_core::services::{AcceptOutcome, GroupService, InvitationService};
use chipin_core::{DomainError, User};
use chipin_infrastructure::{MemoryStore, OutboxNotifier};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;

const BASE_URL: &str = "http://chipin.test/";

struct Harness {
    store: Arc<MemoryStore>,
    outbox: Arc<OutboxNotifier>,
    groups: GroupService,
    invitations: InvitationService,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let outbox = Arc::new(OutboxNotifier::new());
        Self {
            groups: GroupService::new(store.clone(), store.clone()),
            invitations: InvitationService::new(store.clone(), store.clone(), outbox.clone()),
            store,
            outbox,
        }
    }

    async fn user(&self, username: &str, email: &str) -> User {
        let user = User::new(username, email);
        self.store.insert_user(user.clone()).await;
        user
    }

    async fn members(&self, group_id: &uuid::Uuid) -> Vec<String> {
        self.groups
            .group_detail(group_id)
            .await
            .unwrap()
            .members
            .into_iter()
            .map(|u| u.username)
            .collect()
    }
}

fn email_param(link: &str) -> &str {
    link.split_once("?email=").map(|(_, v)| v).expect("link has email parameter")
}

#[tokio::test]
async fn invite_accept_twice_scenario() {
    let h = Harness::new();
    let alice = h.user("alice", "alice@example.com").await;
    h.user("bob", "bob@example.com").await;

    let g1 = h.groups.create_group(&alice, "g1").await.unwrap();
    assert_eq!(h.members(&g1.id).await, vec!["alice"]);

    let invitation = h
        .invitations
        .invite_to_group(&g1.id, "bob@example.com", BASE_URL)
        .await
        .unwrap();

    let sent = h.outbox.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["bob@example.com".to_string()]);
    assert_eq!(sent[0].subject, "You have been invited to join the group g1");
    assert!(sent[0].html_body.contains(&invitation.link));

    let param = email_param(&invitation.link);

    let first = h.invitations.accept_invitation(&g1.id, Some(param)).await.unwrap();
    assert!(matches!(first, AcceptOutcome::Joined { ref user, .. } if user.username == "bob"));
    assert_eq!(h.members(&g1.id).await, vec!["alice", "bob"]);

    let second = h.invitations.accept_invitation(&g1.id, Some(param)).await.unwrap();
    assert!(matches!(second, AcceptOutcome::AlreadyMember { ref user, .. } if user.username == "bob"));
    assert_eq!(h.members(&g1.id).await, vec!["alice", "bob"]);
}

#[tokio::test]
async fn link_round_trips_unusual_emails() {
    let h = Harness::new();
    let admin = h.user("admin", "admin@example.com").await;
    let group = h.groups.create_group(&admin, "Unusual").await.unwrap();

    for (username, email) in [
        ("plus", "plus+tag@example.com"),
        ("space", "with space@example.com"),
        ("percent", "50%off@example.com"),
    ] {
        h.user(username, email).await;
        let invitation = h.invitations.issue_invitation(&group, email, BASE_URL).await.unwrap();
        let param = email_param(&invitation.link);
        assert_eq!(decode_email(param).as_deref(), Some(email));

        let outcome = h.invitations.accept_invitation(&group.id, Some(param)).await.unwrap();
        assert!(matches!(outcome, AcceptOutcome::Joined { ref user, .. } if user.email == email));
    }

    assert_eq!(h.members(&group.id).await.len(), 4);
}

#[tokio::test]
async fn missing_email_never_mutates() {
    let h = Harness::new();
    let alice = h.user("alice", "alice@example.com").await;
    let group = h.groups.create_group(&alice, "g1").await.unwrap();

    for encoded in [None, Some("")] {
        let outcome = h.invitations.accept_invitation(&group.id, encoded).await.unwrap();
        assert!(matches!(outcome, AcceptOutcome::InvalidLink { .. }));
    }
    assert_eq!(h.members(&group.id).await, vec!["alice"]);
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let h = Harness::new();
    let alice = h.user("alice", "alice@example.com").await;
    let group = h.groups.create_group(&alice, "g1").await.unwrap();

    let stranger: String = SafeEmail().fake();
    let invitation = h.invitations.issue_invitation(&group, &stranger, BASE_URL).await.unwrap();

    let err = h
        .invitations
        .accept_invitation(&group.id, Some(email_param(&invitation.link)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound));
    assert_eq!(h.members(&group.id).await, vec!["alice"]);
}

#[tokio::test]
async fn concurrent_accepts_join_once() {
    let h = Arc::new(Harness::new());
    let alice = h.user("alice", "alice@example.com").await;
    h.user("bob", "bob@example.com").await;
    let group = h.groups.create_group(&alice, "g1").await.unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let h = h.clone();
            let group_id = group.id;
            tokio::spawn(async move {
                h.invitations
                    .accept_invitation(&group_id, Some("bob%40example.com"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut joined = 0;
    for task in tasks {
        if matches!(task.await.unwrap(), AcceptOutcome::Joined { .. }) {
            joined += 1;
        }
    }

    assert_eq!(joined, 1);
    assert_eq!(h.members(&group.id).await, vec!["alice", "bob"]);
}

#[tokio::test]
async fn delete_requires_admin() {
    let h = Harness::new();
    let alice = h.user("alice", "alice@example.com").await;
    let mallory = h.user(&Username().fake::<String>(), &SafeEmail().fake::<String>()).await;
    let group = h.groups.create_group(&alice, "g1").await.unwrap();

    let err = h.groups.delete_group(&mallory, &group.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied));
    assert!(GroupRepository::find_by_id(h.store.as_ref(), &group.id).await.unwrap().is_some());

    h.groups.delete_group(&alice, &group.id).await.unwrap();
    assert_eq!(h.store.group_count().await, 0);

    let err = h.groups.group_detail(&group.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn invite_candidates_shrink_after_join() {
    let h = Harness::new();
    let alice = h.user("alice", "alice@example.com").await;
    h.user("bob", "bob@example.com").await;
    h.user("carol", "carol@example.com").await;
    let group = h.groups.create_group(&alice, "g1").await.unwrap();

    let before = h.groups.invite_candidates(&group.id).await.unwrap();
    let names: Vec<_> = before.users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);

    h.invitations
        .accept_invitation(&group.id, Some("bob%40example.com"))
        .await
        .unwrap();

    let after = h.groups.invite_candidates(&group.id).await.unwrap();
    let names: Vec<_> = after.users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["carol"]);
}
