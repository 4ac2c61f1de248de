//! Behavioural tests for profile resolution across session changes.
//!
//! The resolver and session service run for real against in-memory
//! identity and profile doubles.

use std::sync::Arc;
use std::time::Duration;

use dashboard::domain::ports::{AccessQuery, SessionCommand};
use dashboard::domain::{
    Access, ErrorCode, OrganizationId, Principal, ProfileResolver, Role, SessionService,
    UserProfile,
};
use dashboard::inbound::dashboard::{LoadState, ProfileView, Screen};
use futures::future::join_all;
use rstest::{fixture, rstest};

mod support;

use support::doubles::{FakeIdentity, StoredProfiles};

struct World {
    identity: Arc<FakeIdentity>,
    profiles: Arc<StoredProfiles>,
    resolver: Arc<ProfileResolver<FakeIdentity, StoredProfiles>>,
    session: Arc<SessionService<FakeIdentity>>,
    owner: Principal,
    attendant: Principal,
}

fn profile(
    principal: &Principal,
    organization_id: OrganizationId,
    role: Role,
    owner: &Principal,
) -> UserProfile {
    UserProfile {
        user_id: *principal.user_id(),
        organization_id,
        role,
        owner_id: *owner.user_id(),
    }
}

#[fixture]
fn world() -> World {
    let identity = Arc::new(FakeIdentity::new());
    let profiles = Arc::new(StoredProfiles::default());
    let owner = identity.register("dona@padaria.com.br");
    let attendant = identity.register("caixa@padaria.com.br");
    let shop = OrganizationId::random();
    profiles.insert(profile(&owner, shop, Role::Owner, &owner));
    profiles.insert(profile(&attendant, shop, Role::Employee, &owner));
    World {
        resolver: Arc::new(ProfileResolver::new(
            Arc::clone(&identity),
            Arc::clone(&profiles),
        )),
        session: Arc::new(SessionService::new(Arc::clone(&identity), None)),
        identity,
        profiles,
        owner,
        attendant,
    }
}

async fn wait_for_screen(view: &ProfileView, screen: Screen) {
    let mut states = view.subscribe();
    tokio::time::timeout(
        Duration::from_secs(2),
        states.wait_for(|state| Screen::for_state(state) == screen),
    )
    .await
    .expect("screen reached in time")
    .expect("view alive");
}

#[rstest]
#[tokio::test]
async fn signing_out_never_yields_the_previous_profile(world: World) {
    world
        .session
        .sign_in("dona@padaria.com.br", "s3gredo")
        .await
        .expect("owner signs in");
    let first = world.resolver.resolve().await.expect("resolves");
    assert!(matches!(first, Access::Owner(_)));

    world.session.sign_out().await.expect("signs out");
    world.resolver.invalidate();

    assert_eq!(world.resolver.resolve().await.expect("resolves"), Access::Anonymous);
    assert_eq!(world.identity.sign_outs(), 1);
}

#[rstest]
#[tokio::test]
async fn concurrent_resolutions_share_one_lookup(world: World) {
    world.identity.switch_to(Some(world.owner.clone()));

    let results = join_all((0..8).map(|_| world.resolver.resolve())).await;

    assert!(results
        .iter()
        .all(|result| matches!(result, Ok(Access::Owner(_)))));
    assert_eq!(world.profiles.calls(), vec![*world.owner.user_id()]);
}

#[rstest]
#[tokio::test]
async fn a_lookup_straddling_a_session_switch_is_discarded(world: World) {
    world.identity.switch_to(Some(world.owner.clone()));
    let gate = world.profiles.hold_next();
    let resolver = Arc::clone(&world.resolver);
    let pending = tokio::spawn(async move { resolver.resolve().await });

    gate.entered().await;
    world.identity.switch_to(Some(world.attendant.clone()));
    world.resolver.invalidate();
    gate.release();

    let resolved = pending.await.expect("task joins").expect("resolves");
    let Access::Employee(found) = resolved else {
        panic!("expected the attendant's profile, got {resolved:?}");
    };
    assert_eq!(found.user_id, *world.attendant.user_id());
    assert_eq!(
        world.profiles.calls(),
        vec![*world.owner.user_id(), *world.attendant.user_id()]
    );

    // The fresh result is cached.
    world.resolver.resolve().await.expect("resolves");
    assert_eq!(world.profiles.calls().len(), 2);
}

#[rstest]
#[tokio::test]
async fn unknown_credentials_keep_the_session_anonymous(world: World) {
    let err = world
        .session
        .sign_in("intruso@example.com", "qualquer")
        .await
        .expect_err("sign-in rejected");
    assert_eq!(err.code(), ErrorCode::ExternalService);
    assert_eq!(world.resolver.resolve().await.expect("resolves"), Access::Anonymous);
    assert!(world.profiles.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn the_profile_view_follows_sign_in_and_out(world: World) {
    let access: Arc<dyn AccessQuery> = world.resolver.clone();
    let session: Arc<dyn SessionCommand> = world.session.clone();
    let view = ProfileView::mount(access, &session);
    wait_for_screen(&view, Screen::Login).await;

    session
        .sign_in("caixa@padaria.com.br", "s3gredo")
        .await
        .expect("attendant signs in");
    wait_for_screen(&view, Screen::EmployeeWorkspace).await;

    session.sign_out().await.expect("signs out");
    wait_for_screen(&view, Screen::Login).await;

    session
        .sign_in("dona@padaria.com.br", "s3gredo")
        .await
        .expect("owner signs in");
    wait_for_screen(&view, Screen::OwnerDashboard).await;
    let LoadState::Ready(Access::Owner(shown)) = view.state() else {
        panic!("owner dashboard without an owner profile");
    };
    assert_eq!(shown.user_id, *world.owner.user_id());
}
