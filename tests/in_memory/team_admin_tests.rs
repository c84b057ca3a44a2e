//! Sign-in and team administration over the in-memory profile adapters.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;
use teamboard::profile::{
    domain::{ProfileUpdate, Role, RoleId, UserType},
    ports::{AuthGateway, ProfileDirectoryError},
    services::{AddMemberRequest, SessionService, TeamAdminError, TeamAdministrationService},
};

use super::helpers::{Team, team};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_restore_and_sign_out_round_trip(team: Team) {
    let sessions = SessionService::new(Arc::clone(&team.auth), Arc::clone(&team.directory));

    let session = sessions
        .login("selin.aksoy@example.com", "hunter22")
        .await
        .expect("leader signs in");
    assert!(session.is_team_leader());
    let token = session.auth().access_token().to_owned();

    let restored = sessions
        .restore(&token)
        .await
        .expect("restore succeeds")
        .expect("token is still valid");
    assert_eq!(restored.user_id(), team.leader.user_id());

    sessions.logout(session).await.expect("sign out");
    let after_logout = sessions.restore(&token).await.expect("restore succeeds");
    assert!(after_logout.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn added_member_can_sign_in_with_temporary_password(team: Team) {
    let admin = TeamAdministrationService::new(Arc::clone(&team.directory));

    let added = admin
        .add_member(
            &team.leader,
            AddMemberRequest::new("ece.kaya@example.com", "Ece Kaya", "QA"),
        )
        .await
        .expect("leader adds member");
    assert_eq!(added.profile.user_type(), UserType::TeamMember);
    assert!(!added.temporary_password.is_empty());

    let auth = team
        .auth
        .sign_in("ece.kaya@example.com", &added.temporary_password)
        .await
        .expect("temporary password works");
    assert_eq!(auth.user_id(), added.profile.id());

    let members = admin.members(&team.leader).await.expect("list members");
    let names: Vec<&str> = members.iter().map(|member| member.full_name()).collect();
    assert_eq!(names, ["Ece Kaya", "Mert Yilmaz", "Selin Aksoy"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected(team: Team) {
    let admin = TeamAdministrationService::new(Arc::clone(&team.directory));

    let err = admin
        .add_member(
            &team.leader,
            AddMemberRequest::new("mert.yilmaz@example.com", "Mert Again", "Backend"),
        )
        .await
        .expect_err("email already taken");

    assert!(matches!(
        err,
        TeamAdminError::Directory(ProfileDirectoryError::Rejected(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_administer_the_team(team: Team) {
    let admin = TeamAdministrationService::new(Arc::clone(&team.directory));

    assert!(matches!(
        admin.members(&team.member).await,
        Err(TeamAdminError::Forbidden)
    ));
    assert!(matches!(
        admin.roles(&team.member).await,
        Err(TeamAdminError::Forbidden)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leader_promotes_member_and_lists_roles(team: Team) {
    for name in ["QA", "Backend", "Frontend"] {
        team.directory
            .insert_role(Role {
                id: RoleId::new(),
                name: name.to_owned(),
                created_at: Utc::now(),
            })
            .expect("seed role");
    }
    let admin = TeamAdministrationService::new(Arc::clone(&team.directory));

    let promoted = admin
        .update_member(
            &team.leader,
            team.member.user_id(),
            ProfileUpdate::new()
                .with_role("Backend")
                .expect("role is valid")
                .with_user_type(UserType::TeamLeader),
        )
        .await
        .expect("update succeeds");
    assert!(promoted.is_team_leader());
    assert_eq!(promoted.role(), "Backend");

    let roles = admin.roles(&team.leader).await.expect("list roles");
    let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, ["Backend", "Frontend", "QA"]);
}
