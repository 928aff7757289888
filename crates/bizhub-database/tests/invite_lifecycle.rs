//! Invite state machine and unique-index behavior against a live schema.
//!
//! Each test runs in its own database provisioned by `sqlx::test` with the
//! workspace migrations applied.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bizhub_core::error::ErrorKind;
use bizhub_database::repositories::business::BusinessRepository;
use bizhub_database::repositories::invite::InviteRepository;
use bizhub_database::repositories::staff::StaffRepository;
use bizhub_database::repositories::user::UserRepository;
use bizhub_entity::business::model::CreateBusiness;
use bizhub_entity::invite::model::CreateInvite;
use bizhub_entity::invite::status::InviteStatus;
use bizhub_entity::staff::BusinessRole;
use bizhub_entity::staff::model::CreateStaffMembership;
use bizhub_entity::user::model::CreateUser;

async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
    UserRepository::new(pool.clone())
        .create(&CreateUser {
            first_name: "Test".into(),
            last_name: "User".into(),
            email: email.into(),
            password_hash: "$argon2id$test".into(),
            phone: None,
        })
        .await
        .unwrap()
        .id
}

async fn seed_business(pool: &PgPool, owner_id: Uuid) -> Uuid {
    BusinessRepository::new(pool.clone())
        .create(&CreateBusiness {
            owner_id,
            name: "Acme Bakery".into(),
            industry: "food".into(),
            phone_number: "+15550000000".into(),
            email: None,
            address: None,
        })
        .await
        .unwrap()
        .id
}

fn invite_data(business_id: Uuid, invited_by: Uuid, email: &str, token: &str) -> CreateInvite {
    CreateInvite {
        business_id,
        invited_by,
        email: email.into(),
        role: BusinessRole::Manager,
        permissions: BusinessRole::Manager.default_permissions(),
        token: token.into(),
        expires_at: Utc::now() + Duration::days(7),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_membership_conflicts(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let member = seed_user(&pool, "member@example.com").await;
    let business = seed_business(&pool, owner).await;

    let repo = StaffRepository::new(pool.clone());
    let data =
        CreateStaffMembership::with_default_permissions(business, member, BusinessRole::Staff);

    repo.create(&data).await.unwrap();
    let err = repo.create(&data).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let existing = repo.find_membership(business, member).await.unwrap();
    assert!(existing.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_pending_invite_conflicts(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let business = seed_business(&pool, owner).await;

    let repo = InviteRepository::new(pool.clone());
    repo.create(&invite_data(business, owner, "new.hire@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    let err = repo
        .create(&invite_data(business, owner, "new.hire@example.com", &"bb".repeat(32)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[sqlx::test(migrations = "../../migrations")]
async fn accept_creates_membership_and_flips_status(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let joiner = seed_user(&pool, "new.hire@example.com").await;
    let business = seed_business(&pool, owner).await;

    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&invite_data(business, owner, "new.hire@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    let membership = repo
        .accept(
            invite.id,
            &CreateStaffMembership {
                business_id: business,
                user_id: joiner,
                role: invite.role,
                permissions: invite.permissions.0.clone(),
            },
        )
        .await
        .unwrap();

    assert_eq!(membership.role, BusinessRole::Manager);
    assert_eq!(
        membership.permissions.0,
        BusinessRole::Manager.default_permissions()
    );
    assert!(membership.is_active);

    let stored = repo.find_by_id(invite.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InviteStatus::Accepted);
}

#[sqlx::test(migrations = "../../migrations")]
async fn second_accept_of_the_same_token_fails(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let joiner = seed_user(&pool, "new.hire@example.com").await;
    let business = seed_business(&pool, owner).await;

    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&invite_data(business, owner, "new.hire@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    let membership = CreateStaffMembership {
        business_id: business,
        user_id: joiner,
        role: invite.role,
        permissions: invite.permissions.0.clone(),
    };

    repo.accept(invite.id, &membership).await.unwrap();
    let err = repo.accept(invite.id, &membership).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[sqlx::test(migrations = "../../migrations")]
async fn cancelled_invite_cannot_be_accepted(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let joiner = seed_user(&pool, "new.hire@example.com").await;
    let business = seed_business(&pool, owner).await;

    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&invite_data(business, owner, "new.hire@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    repo.set_status(invite.id, InviteStatus::Expired).await.unwrap();

    let err = repo
        .accept(
            invite.id,
            &CreateStaffMembership {
                business_id: business,
                user_id: joiner,
                role: invite.role,
                permissions: invite.permissions.0.clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let membership = StaffRepository::new(pool.clone())
        .find_membership(business, joiner)
        .await
        .unwrap();
    assert!(membership.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn accept_reactivates_a_removed_member(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let rejoiner = seed_user(&pool, "rejoiner@example.com").await;
    let business = seed_business(&pool, owner).await;

    let staff_repo = StaffRepository::new(pool.clone());
    let old = staff_repo
        .create(&CreateStaffMembership::with_default_permissions(
            business,
            rejoiner,
            BusinessRole::Staff,
        ))
        .await
        .unwrap();
    staff_repo.deactivate(old.id).await.unwrap();

    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&invite_data(business, owner, "rejoiner@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    let membership = repo
        .accept(
            invite.id,
            &CreateStaffMembership {
                business_id: business,
                user_id: rejoiner,
                role: invite.role,
                permissions: invite.permissions.0.clone(),
            },
        )
        .await
        .unwrap();

    // The old row is reactivated in place with the invite's snapshot.
    assert_eq!(membership.id, old.id);
    assert!(membership.is_active);
    assert_eq!(membership.role, BusinessRole::Manager);
    assert_eq!(
        membership.permissions.0,
        BusinessRole::Manager.default_permissions()
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn accept_rolls_back_when_already_an_active_member(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let member = seed_user(&pool, "member@example.com").await;
    let business = seed_business(&pool, owner).await;

    let staff_repo = StaffRepository::new(pool.clone());
    staff_repo
        .create(&CreateStaffMembership::with_default_permissions(
            business,
            member,
            BusinessRole::Staff,
        ))
        .await
        .unwrap();

    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&invite_data(business, owner, "member@example.com", &"aa".repeat(32)))
        .await
        .unwrap();

    let err = repo
        .accept(
            invite.id,
            &CreateStaffMembership {
                business_id: business,
                user_id: member,
                role: invite.role,
                permissions: invite.permissions.0.clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // The redemption rolled back with the membership insert.
    let stored = repo.find_by_id(invite.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InviteStatus::Pending);
}
